use crate::{
    common::url_encode, error::normal_error, request::B2Request, session::B2Session, Error,
};
use bytes::Bytes;
use hyper::{body::to_bytes, header, Method};

/// 通过存储空间名称和文件名下载文件
///
/// 下载的始终是文件的最新版本，公共存储空间中的文件无需授权即可通过此地址访问，
/// 本接口仍会携带账户授权令牌，以便下载私有存储空间中的文件
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_download_file_by_name.html)
pub struct DownloadFileByName {
    b2: B2Session,
    bucket_name: String,
    file_name: String,
}
impl DownloadFileByName {
    pub(crate) fn new(b2: B2Session, bucket_name: &str, file_name: &str) -> Self {
        DownloadFileByName {
            b2,
            bucket_name: bucket_name.to_owned(),
            file_name: file_name.to_owned(),
        }
    }
    //组装请求，会话中缺少授权信息时直接报错
    pub(crate) fn build_request(&self) -> Result<B2Request, Error> {
        let download_url = self.b2.download_url().ok_or(Error::NotAuthorized)?;
        let token = self
            .b2
            .account_authorization_token()
            .ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::GET,
            format!(
                "{}/file/{}/{}",
                download_url,
                url_encode(&self.bucket_name),
                url_encode(&self.file_name)
            ),
            self.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<Bytes, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => Ok(to_bytes(response.into_body()).await?),
            _ => Err(normal_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let mut session = B2Session::new("acct1", "key1");
        session.process_authorization(
            r#"{"downloadUrl":"https://f1.example.com","authorizationToken":"tok"}"#,
        );
        let builder = DownloadFileByName::new(session, "kitten-pics", "cat 1.jpg");
        let req = builder.build_request().unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.uri(), "https://f1.example.com/file/kitten-pics/cat%201.jpg");
        assert_eq!(req.headers.get("authorization").map(String::as_str), Some("tok"));
    }

    #[test]
    fn test_not_authorized() {
        let builder =
            DownloadFileByName::new(B2Session::new("acct1", "key1"), "kitten-pics", "cat.jpg");
        assert!(matches!(builder.build_request(), Err(Error::NotAuthorized)));
    }
}
