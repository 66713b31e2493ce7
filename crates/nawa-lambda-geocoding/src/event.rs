//! API-Gateway proxy event types.
//!
//! Only the fields the gateway consumes are modeled. Header and parameter
//! keys are kept case-sensitive exactly as supplied by the entrypoint; the
//! nullable maps deserialize from both `null` and absent fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use nawa_gateway::{GatewayRequest, GatewayResponse};

/// Inbound proxy event delivered by the invocation entrypoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    #[serde(default)]
    pub http_method: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

impl From<ApiGatewayProxyRequest> for GatewayRequest {
    fn from(event: ApiGatewayProxyRequest) -> Self {
        GatewayRequest {
            method: event.http_method,
            path: event.path,
            query_string_parameters: event.query_string_parameters.unwrap_or_default(),
            headers: event.headers.unwrap_or_default(),
        }
    }
}

/// Outbound proxy response returned to the invocation entrypoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl From<GatewayResponse> for ApiGatewayProxyResponse {
    fn from(response: GatewayResponse) -> Self {
        Self {
            status_code: response.status_code,
            body: response.body,
            headers: response.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_deserializes_from_proxy_json() {
        let event: ApiGatewayProxyRequest = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/.netlify/functions/geocoding/forward",
            "queryStringParameters": { "q": "Seattle" },
            "headers": { "Origin": "http://localhost:3000" }
        }))
        .unwrap();

        let request = GatewayRequest::from(event);
        assert_eq!(request.method, "GET");
        assert_eq!(
            request.query_string_parameters.get("q").map(String::as_str),
            Some("Seattle")
        );
        assert_eq!(request.origin(), "http://localhost:3000");
    }

    #[test]
    fn null_maps_deserialize_as_empty() {
        let event: ApiGatewayProxyRequest = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/x/forward",
            "queryStringParameters": null,
            "headers": null
        }))
        .unwrap();

        let request = GatewayRequest::from(event);
        assert!(request.query_string_parameters.is_empty());
        assert_eq!(request.origin(), "");
    }

    #[test]
    fn response_serializes_with_proxy_field_names() {
        let response = ApiGatewayProxyResponse {
            status_code: 200,
            body: "{}".to_string(),
            headers: HashMap::from([(
                "Access-Control-Allow-Origin".to_string(),
                "http://localhost:3000".to_string(),
            )]),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"statusCode\":200"));
        assert!(json.contains("\"body\":\"{}\""));
        assert!(json.contains("Access-Control-Allow-Origin"));
    }
}
