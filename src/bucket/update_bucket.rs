use crate::{
    common::{Bucket, BucketType},
    error::normal_error,
    request::B2Request,
    B2Bucket, Error,
};
use hyper::{body::to_bytes, header, Method};
use serde_derive::Serialize;

//请求参数
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBucketParams<'a> {
    bucket_id: &'a str,
    bucket_type: BucketType,
}

/// 修改存储空间的访问权限
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_update_bucket.html)
pub struct UpdateBucket {
    bucket: B2Bucket,
    bucket_type: BucketType,
}
impl UpdateBucket {
    pub(super) fn new(bucket: B2Bucket, bucket_type: BucketType) -> Self {
        UpdateBucket {
            bucket,
            bucket_type,
        }
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&UpdateBucketParams {
            bucket_id: &self.bucket.bucket_id,
            bucket_type: self.bucket_type,
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
            format!("{}/b2api/v1/b2_update_bucket", api_url),
            self.bucket.b2.timeout(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::B2Session;
    use serde_json::{json, Value};

    #[test]
    fn test_body() {
        let bucket = B2Bucket::new(B2Session::new("acct1", "key1"), "b1");
        let builder = UpdateBucket::new(bucket, BucketType::AllPublic);
        let body: Value = serde_json::from_slice(&builder.body()).unwrap();
        assert_eq!(body, json!({"bucketId": "b1", "bucketType": "allPublic"}));
    }
}
