// ==========================================
// 生产排程优化前端 - 求解服务传输层
// ==========================================
// 职责: 定义传输接口,提供 HTTP 实现
// 说明: 网关只依赖 trait,测试注入内存实现
// ==========================================

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::request::SolveRequest;

/// 原始响应（状态码 + 响应体文本）
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("求解服务地址无效: {0}")]
    InvalidEndpoint(String),

    #[error("请求超时: {0}")]
    Timeout(String),

    #[error("无法连接: {0}")]
    Connect(String),

    #[error("传输失败: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

// ==========================================
// SolverTransport Trait
// ==========================================
// 实现者: HttpSolverTransport（生产）、测试内存传输
#[async_trait]
pub trait SolverTransport: Send + Sync {
    /// 发送一次求解请求,等待一次响应
    ///
    /// 超时由传输层自身负责,以 TransportError::Timeout 返回。
    async fn post(&self, request: &SolveRequest) -> Result<TransportResponse, TransportError>;
}

// ==========================================
// HttpSolverTransport - HTTP 实现
// ==========================================
pub struct HttpSolverTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpSolverTransport {
    /// 创建 HTTP 传输
    ///
    /// # 参数
    /// - endpoint: 求解服务地址（如 http://localhost:8000/api/v1/schedule）
    /// - timeout: 单次请求超时
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let endpoint = endpoint
            .trim()
            .parse::<reqwest::Url>()
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl SolverTransport for HttpSolverTransport {
    async fn post(&self, request: &SolveRequest) -> Result<TransportResponse, TransportError> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
