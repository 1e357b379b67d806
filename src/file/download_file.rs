use crate::{error::normal_error, request::B2Request, B2File, Error};
use bytes::Bytes;
use futures_util::StreamExt;
use hyper::{body::to_bytes, header, Method};
use serde_derive::Serialize;
use tokio::{
    fs::{create_dir_all, OpenOptions},
    io::{AsyncWriteExt, BufWriter},
};

//请求参数，仅POST方式使用
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DownloadFileParams<'a> {
    file_id: &'a str,
}

/// 通过文件ID下载文件
///
/// 文件ID既可以放在POST请求的消息体中，也可以作为GET请求的查询参数，两种方式等价
///
/// 私有存储空间中的文件必须携带账户授权令牌才能下载
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_download_file_by_id.html)
pub struct DownloadFile {
    file: B2File,
}
impl DownloadFile {
    pub(super) fn new(file: B2File) -> Self {
        DownloadFile { file }
    }
    //组装POST方式的下载请求，文件ID放在消息体中
    pub(crate) fn build_request(&self) -> Result<B2Request, Error> {
        let download_url = self.file.b2.download_url().ok_or(Error::NotAuthorized)?;
        let token = self
            .file
            .b2
            .account_authorization_token()
            .ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::POST,
            format!("{}/b2api/v1/b2_download_file_by_id", download_url),
            self.file.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        let body = serde_json::to_vec(&DownloadFileParams {
            file_id: &self.file.file_id,
        })
        .unwrap_or_default();
        req.set_body(body.into());
        Ok(req)
    }
    //组装GET方式的下载请求，文件ID作为查询参数
    pub(crate) fn build_query_request(&self) -> Result<B2Request, Error> {
        let download_url = self.file.b2.download_url().ok_or(Error::NotAuthorized)?;
        let token = self
            .file
            .b2
            .account_authorization_token()
            .ok_or(Error::NotAuthorized)?;
        let mut req = B2Request::new(
            Method::GET,
            format!("{}/b2api/v1/b2_download_file_by_id", download_url),
            self.file.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.insert_query("fileId", &self.file.file_id);
        Ok(req)
    }
    /// 下载文件，直接将内容返回
    ///
    /// 如果文件较大，此方法可能占用过多内存，谨慎使用
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
    /// 下载文件，文件ID以查询参数方式传递，直接将内容返回
    pub async fn send_by_query(self) -> Result<Bytes, Error> {
        //构建http请求
        let response = self.build_query_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => Ok(to_bytes(response.into_body()).await?),
            _ => Err(normal_error(response).await),
        }
    }
    /// 下载文件保存到磁盘
    ///
    /// 不支持网络路径，如果需要保存到smb\nfs等网络存储，请先挂载到本地，再使用本地路径地址
    pub async fn save_to_file(self, save_path: &str) -> Result<(), Error> {
        //判断路径
        if save_path.contains("://") {
            return Err(Error::PathNotSupported);
        }
        //发起请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                //创建目录
                let parent_dir = std::path::Path::new(save_path).parent();
                if let Some(dir) = parent_dir {
                    create_dir_all(dir).await?;
                }
                //创建文件
                let file = OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(save_path)
                    .await?;
                //创建写入缓冲区
                let mut writer = BufWriter::with_capacity(131072, file);
                //读取字节流
                let mut response_bytes = response.into_body();
                while let Some(chunk) = response_bytes.next().await {
                    match chunk {
                        Ok(data) => writer.write_all(&data).await?,
                        Err(e) => return Err(Error::HyperError(e)),
                    }
                }
                writer.flush().await?;
                writer.shutdown().await?;
                Ok(())
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

    fn ready_file() -> B2File {
        let mut session = B2Session::new("acct1", "key1");
        session.process_authorization(
            r#"{"downloadUrl":"https://f1.example.com","apiUrl":"https://api1.example.com","authorizationToken":"tok"}"#,
        );
        B2File::new(session, "4_zb1_f1")
    }

    #[test]
    fn test_post_variant() {
        let req = DownloadFile::new(ready_file()).build_request().unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(
            req.uri(),
            "https://f1.example.com/b2api/v1/b2_download_file_by_id"
        );
        let body: Value = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(body, json!({"fileId": "4_zb1_f1"}));
    }

    #[test]
    fn test_query_variant() {
        let req = DownloadFile::new(ready_file()).build_query_request().unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.uri(),
            "https://f1.example.com/b2api/v1/b2_download_file_by_id?fileId=4_zb1_f1"
        );
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_not_authorized() {
        let file = B2File::new(B2Session::new("acct1", "key1"), "4_zb1_f1");
        assert!(matches!(
            DownloadFile::new(file).build_request(),
            Err(Error::NotAuthorized)
        ));
    }
}
