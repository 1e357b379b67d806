use crate::{error::normal_error, request::B2Request, B2Bucket, Error};
use hyper::{body::to_bytes, header, Method};
use serde_derive::{Deserialize, Serialize};

//请求参数
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetUploadUrlParams<'a> {
    bucket_id: &'a str,
}

// 返回内容
/// 上传地址信息
///
/// 所有字段均为可选，响应中缺失的字段不会阻止其余字段被会话吸收
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrl {
    /// 所属存储空间ID
    #[serde(default)]
    pub bucket_id: Option<String>,
    /// 上传专用地址，仅对本次会话有效
    #[serde(default)]
    pub upload_url: Option<String>,
    /// 上传专用授权令牌，与账户授权令牌相互独立
    #[serde(default)]
    pub authorization_token: Option<String>,
}

/// 获取上传地址
///
/// 上传文件前必须先获取上传地址和上传令牌，两者配对使用
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_get_upload_url.html)
pub struct GetUploadUrl {
    bucket: B2Bucket,
}
impl GetUploadUrl {
    pub(super) fn new(bucket: B2Bucket) -> Self {
        GetUploadUrl { bucket }
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&GetUploadUrlParams {
            bucket_id: &self.bucket.bucket_id,
        })
        .unwrap_or_default()
    }
    //组装请求，会话中缺少授权信息时直接报错
    pub(crate) fn build_request(&self) -> Result<B2Request, Error> {
        let api_url = self.bucket.b2.api_url().ok_or(Error::NotAuthorized)?;
        let token = self
            .bucket
            .b2
            .account_authorization_token()
            .ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::POST,
            format!("{}/b2api/v1/b2_get_upload_url", api_url),
            self.bucket.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<UploadUrl, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let upload_url: UploadUrl = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(upload_url)
            }
            _ => Err(normal_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::B2Session;
    use serde_json::{json, Value};

    #[test]
    fn test_body() {
        let bucket = B2Bucket::new(B2Session::new("acct1", "key1"), "b1");
        let builder = GetUploadUrl::new(bucket);
        let body: Value = serde_json::from_slice(&builder.body()).unwrap();
        assert_eq!(body, json!({"bucketId": "b1"}));
    }

    #[test]
    fn test_not_authorized() {
        let bucket = B2Bucket::new(B2Session::new("acct1", "key1"), "b1");
        let builder = GetUploadUrl::new(bucket);
        assert!(matches!(builder.build_request(), Err(Error::NotAuthorized)));
    }
}
