use crate::{
    common::Bucket, error::normal_error, request::B2Request, session::B2Session, Error,
};
use hyper::{body::to_bytes, header, Method};
use serde_derive::{Deserialize, Serialize};

//请求参数
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListBucketsParams<'a> {
    account_id: &'a str,
}

//返回内容
#[derive(Debug, Deserialize)]
struct BucketList {
    buckets: Vec<Bucket>,
}

/// 查询存储空间列表
///
/// 返回账户下的全部存储空间，B2不对此接口分页
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_list_buckets.html)
pub struct ListBuckets {
    b2: B2Session,
}
impl ListBuckets {
    pub(super) fn new(b2: B2Session) -> Self {
        ListBuckets { b2 }
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&ListBucketsParams {
            account_id: self.b2.account_id(),
        })
        .unwrap_or_default()
    }
    //组装请求，会话中缺少授权信息时直接报错
    pub(crate) fn build_request(&self) -> Result<B2Request, Error> {
        let api_url = self.b2.api_url().ok_or(Error::NotAuthorized)?;
        let token = self.b2.account_authorization_token().ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::POST,
            format!("{}/b2api/v1/b2_list_buckets", api_url),
            self.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<Vec<Bucket>, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let bucket_list: BucketList = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(bucket_list.buckets)
            }
            _ => Err(normal_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_body() {
        let builder = ListBuckets::new(B2Session::new("acct1", "key1"));
        let body: Value = serde_json::from_slice(&builder.body()).unwrap();
        assert_eq!(body, json!({"accountId": "acct1"}));
    }

    #[test]
    fn test_not_authorized() {
        let mut session = B2Session::new("acct1", "key1");
        session.process_authorization(r#"{"apiUrl":"https://api1.example.com"}"#);
        //仅有API地址而缺少令牌时同样视为未授权
        let builder = ListBuckets::new(session);
        assert!(matches!(builder.build_request(), Err(Error::NotAuthorized)));
    }
}
