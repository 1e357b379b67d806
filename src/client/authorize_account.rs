use crate::{
    error::normal_error,
    request::B2Request,
    session::{B2Session, AUTH_SERVER},
    Error,
};
use base64::{engine::general_purpose, Engine};
use hyper::{body::to_bytes, header, Method};
use serde_derive::Deserialize;

// 返回内容
/// 账户授权结果
///
/// 所有字段均为可选，响应中缺失的字段不会阻止其余字段被会话吸收
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// 账户ID
    #[serde(default)]
    pub account_id: Option<String>,
    /// 账户授权令牌，后续大部分接口都需要携带
    #[serde(default)]
    pub authorization_token: Option<String>,
    /// API服务地址
    #[serde(default)]
    pub api_url: Option<String>,
    /// 下载服务地址
    #[serde(default)]
    pub download_url: Option<String>,
}

/// 账户授权
///
/// 向固定的授权服务器发起请求，账户ID和应用密钥以HTTP Basic方式携带，
/// 返回的令牌与服务地址是后续所有接口的前置条件
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_authorize_account.html)
pub struct AuthorizeAccount {
    b2: B2Session,
}
impl AuthorizeAccount {
    pub(super) fn new(b2: B2Session) -> Self {
        AuthorizeAccount { b2 }
    }
    //组装请求，身份信息以Basic方式编码
    pub(crate) fn build_request(&self) -> B2Request {
        let mut req = B2Request::new(
            Method::GET,
            format!("https://{}/b2api/v1/b2_authorize_account", AUTH_SERVER),
            self.b2.timeout(),
        );
        let auth_str = format!("{}:{}", self.b2.account_id(), self.b2.application_key());
        let base64_str = general_purpose::STANDARD.encode(auth_str.as_bytes());
        req.insert_header(header::AUTHORIZATION, format!("Basic {}", base64_str));
        req
    }
    /// 发送请求
    pub async fn send(self) -> Result<Authorization, Error> {
        //构建http请求
        let response = self.build_request().send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let authorization: Authorization = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(authorization)
            }
            _ => Err(normal_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_credentials() {
        let builder = AuthorizeAccount::new(B2Session::new("acct1", "key1"));
        let req = builder.build_request();
        assert_eq!(
            req.headers.get("authorization").map(String::as_str),
            Some("Basic YWNjdDE6a2V5MQ==")
        );
        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.uri(),
            "https://api.backblazeb2.com/b2api/v1/b2_authorize_account"
        );
    }

    #[test]
    fn test_authorization_parse() {
        let authorization: Authorization = serde_json::from_str(
            r#"{"accountId":"acct1","apiUrl":"https://api1.example.com","authorizationToken":"tok","downloadUrl":"https://f1.example.com"}"#,
        )
        .unwrap();
        assert_eq!(authorization.api_url.as_deref(), Some("https://api1.example.com"));
        assert_eq!(authorization.authorization_token.as_deref(), Some("tok"));
        let partial: Authorization = serde_json::from_str(r#"{"accountId":"acct1"}"#).unwrap();
        assert!(partial.api_url.is_none());
        assert!(partial.authorization_token.is_none());
    }
}
