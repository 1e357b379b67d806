use crate::{
    common::FileInfo, error::normal_error, request::B2Request, B2File, Error,
};
use hyper::{body::to_bytes, header, Method};
use serde_derive::Serialize;

//请求参数
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetFileInfoParams<'a> {
    file_id: &'a str,
}

/// 查询文件的详细元信息
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_get_file_info.html)
pub struct GetFileInfo {
    file: B2File,
}
impl GetFileInfo {
    pub(super) fn new(file: B2File) -> Self {
        GetFileInfo { file }
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&GetFileInfoParams {
            file_id: &self.file.file_id,
        })
        .unwrap_or_default()
    }
    //组装请求，会话中缺少授权信息时直接报错
    pub(crate) fn build_request(&self) -> Result<B2Request, Error> {
        let api_url = self.file.b2.api_url().ok_or(Error::NotAuthorized)?;
        let token = self
            .file
            .b2
            .account_authorization_token()
            .ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::POST,
            format!("{}/b2api/v1/b2_get_file_info", api_url),
            self.file.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<FileInfo, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let file_info: FileInfo = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(file_info)
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
        let file = B2File::new(B2Session::new("acct1", "key1"), "4_zb1_f1");
        let builder = GetFileInfo::new(file);
        let body: Value = serde_json::from_slice(&builder.body()).unwrap();
        assert_eq!(body, json!({"fileId": "4_zb1_f1"}));
    }

    #[test]
    fn test_file_info_parse() {
        let file_info: FileInfo = serde_json::from_str(
            r#"{
                "accountId": "acct1",
                "bucketId": "b1",
                "contentLength": 122573,
                "contentSha1": "a01a21253a07fb08a354acd30f3a6f32abb76821",
                "contentType": "image/jpeg",
                "fileId": "4_zb1_f1",
                "fileInfo": {"author": "unknown"},
                "fileName": "yawning_cat.jpg"
            }"#,
        )
        .unwrap();
        assert_eq!(file_info.file_name, "yawning_cat.jpg");
        assert_eq!(file_info.content_length, Some(122573));
        assert_eq!(file_info.file_info.get("author").map(String::as_str), Some("unknown"));
    }
}
