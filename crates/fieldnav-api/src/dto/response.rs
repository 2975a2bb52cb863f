use serde::Serialize;

/// Success envelope shared by every route
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "fieldnav-api",
            timestamp: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkedCountResponse {
    pub marked_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: usize,
}
