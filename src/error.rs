use bytes::Bytes;
use hyper::{body::to_bytes, Body, Response, StatusCode};
use serde_derive::Deserialize;
use thiserror::Error;

/// B2返回的标准错误消息体
#[derive(Debug, Deserialize)]
pub struct B2ErrorResponse {
    /// HTTP状态码
    pub status: u16,
    /// 错误代码，例如 bad_request、unauthorized
    pub code: String,
    /// 错误的文字描述
    pub message: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("不支持网络路径")]
    PathNotSupported,
    #[error("文件大小超过5GB，单次上传接口无法处理")]
    FileTooBig,
    #[error("{0}")]
    HyperError(#[from] hyper::Error),
    #[error("{0}")]
    HttpError(#[from] hyper::http::Error),
    #[error("请求超时")]
    Timeout,
    #[error("尚未完成账户授权，请先调用 b2_authorize_account")]
    NotAuthorized,
    #[error("尚未获取上传地址，请先调用 b2_get_upload_url")]
    UploadNotReady,
    #[error("B2返回了成功，但消息体解析失败，请自行解析")]
    B2InvalidResponse(Option<Bytes>),
    #[error("B2返回了错误，HTTP状态码：{0}，错误内容：\n{1:?}")]
    B2Error(StatusCode, Option<B2ErrorResponse>),
}

pub async fn normal_error(response: Response<Body>) -> Error {
    let status_code = response.status();
    match to_bytes(response.into_body()).await {
        Err(_) => Error::B2Error(status_code, None),
        Ok(response_bytes) => {
            let error_info = serde_json::from_slice(&response_bytes).ok();
            Error::B2Error(status_code, error_info)
        }
    }
}
