use crate::{error::normal_error, request::B2Request, B2File, Error};
use hyper::{body::to_bytes, header, Method};
use serde_derive::{Deserialize, Serialize};

//请求参数
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteFileVersionParams<'a> {
    file_name: &'a str,
    file_id: &'a str,
}

// 返回内容
/// 已删除的文件版本
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFileVersion {
    /// 文件ID
    pub file_id: String,
    /// 文件名
    pub file_name: String,
}

/// 删除指定的文件版本
///
/// 删除的是单个版本而不是整个文件，如果删除的是最新版本，上一个版本将成为最新版本
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_delete_file_version.html)
pub struct DeleteFileVersion {
    file: B2File,
    file_name: String,
}
impl DeleteFileVersion {
    pub(super) fn new(file: B2File, file_name: impl ToString) -> Self {
        DeleteFileVersion {
            file,
            file_name: file_name.to_string(),
        }
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&DeleteFileVersionParams {
            file_name: &self.file_name,
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
            format!("{}/b2api/v1/b2_delete_file_version", api_url),
            self.file.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<DeletedFileVersion, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let deleted: DeletedFileVersion = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(deleted)
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
        let builder = DeleteFileVersion::new(file, "cat.jpg");
        let body: Value = serde_json::from_slice(&builder.body()).unwrap();
        assert_eq!(body, json!({"fileName": "cat.jpg", "fileId": "4_zb1_f1"}));
    }
}
