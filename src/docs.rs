//! Static API documentation served at `GET /` without a `key`.

use serde_json::{json, Value};

/// API name shown in the documentation payload.
pub const API_NAME: &str = "MCMod 搜索 API";

/// Build the documentation payload, advertising `base_url` as the endpoint.
pub fn api_docs(base_url: &str) -> Value {
    let example_url = format!("{base_url}?key=IC2");
    json!({
        "name": API_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "这是一个用于搜索 MCMod 百科的 API 接口",
        "base_url": base_url,
        "endpoints": [
            {
                "path": "/",
                "method": "GET",
                "description": "获取 API 使用说明"
            },
            {
                "path": "/?key={search_term}",
                "method": "GET",
                "description": "搜索模组",
                "parameters": {
                    "key": {
                        "type": "string",
                        "required": true,
                        "description": "搜索关键词"
                    }
                },
                "example": example_url
            }
        ],
        "response_format": {
            "success": "boolean - 请求是否成功",
            "search_term": "string - 搜索关键词",
            "timestamp": "string - 搜索时间",
            "total_results": "integer - 搜索结果总数",
            "best_result": {
                "score": "number - 结果评分",
                "address": "string - 模组页面地址",
                "title": "string - 模组标题",
                "description": "string - 模组描述",
                "snapshot_time": "string - 数据快照时间",
                "data": {
                    "mcmod_id": "string - 模组ID",
                    "abbr": "string|null - 模组缩写",
                    "chinese_name": "string - 模组中文名",
                    "sub_name": "string|null - 模组副标题/英文名"
                }
            },
            "other_results": "array - 其他搜索结果，格式同 best_result"
        },
        "example_response": {
            "success": true,
            "search_term": "IC2",
            "timestamp": "2025-02-16 15:28:47",
            "total_results": 30,
            "best_result": {
                "score": 195.0,
                "address": "https://www.mcmod.cn/class/2.html",
                "title": "[IC2] 工业时代2 (Industrial Craft 2)",
                "description": "工业时代2是一个...(省略)",
                "snapshot_time": "2025-02-12",
                "data": {
                    "mcmod_id": "2",
                    "abbr": "IC2",
                    "chinese_name": "工业时代2",
                    "sub_name": "Industrial Craft 2"
                }
            },
            "other_results": []
        }
    })
}
