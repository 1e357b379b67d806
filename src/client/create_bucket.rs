use crate::{
    common::{Bucket, BucketType},
    error::normal_error,
    request::B2Request,
    session::B2Session,
    Error,
};
use hyper::{body::to_bytes, header, Method};
use serde_derive::Serialize;

//请求参数
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBucketParams<'a> {
    account_id: &'a str,
    bucket_name: &'a str,
    bucket_type: BucketType,
}

/// 创建存储空间
///
/// 存储空间名称全局唯一，重名时B2会返回错误
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_create_bucket.html)
pub struct CreateBucket {
    b2: B2Session,
    bucket_name: String,
    bucket_type: BucketType,
}
impl CreateBucket {
    pub(super) fn new(b2: B2Session, bucket_name: &str) -> Self {
        CreateBucket {
            b2,
            bucket_name: bucket_name.to_owned(),
            bucket_type: BucketType::AllPrivate,
        }
    }
    /// 设置存储空间的访问权限，默认为私有
    pub fn set_bucket_type(mut self, bucket_type: BucketType) -> Self {
        self.bucket_type = bucket_type;
        self
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&CreateBucketParams {
            account_id: self.b2.account_id(),
            bucket_name: &self.bucket_name,
            bucket_type: self.bucket_type,
        })
        .unwrap_or_default()
    }
    //组装请求，会话中缺少授权信息时直接报错
    pub(crate) fn build_request(&self) -> Result<B2Request, Error> {
        let api_url = self.b2.api_url().ok_or(Error::NotAuthorized)?;
        let token = self.b2.account_authorization_token().ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::POST,
            format!("{}/b2api/v1/b2_create_bucket", api_url),
            self.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<Bucket, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let bucket: Bucket = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(bucket)
            }
            _ => Err(normal_error(response).await),
        }
    }
}
