use crate::{
    common::{to_hex, url_encode, FileInfo},
    error::normal_error,
    request::B2Request,
    B2Bucket, Error,
};
use bytes::Bytes;
use hyper::{body::to_bytes, header, Method};
use ring::digest::{digest, SHA1_FOR_LEGACY_USE_ONLY};
use std::collections::HashMap;

/// 上传文件
///
/// 单次上传的文件大小不能超过5GB
///
/// 上传前必须先通过获取上传地址接口取得上传地址与上传令牌，
/// 默认情况下，如果已存在同名文件，则新上传的内容成为该文件的最新版本
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_upload_file.html)
pub struct UploadFile {
    bucket: B2Bucket,
    file_name: String,
    content_type: Option<String>,
    file_info: HashMap<String, String>,
}

impl UploadFile {
    pub(super) fn new(bucket: B2Bucket, file_name: impl ToString) -> Self {
        UploadFile {
            bucket,
            file_name: file_name.to_string(),
            content_type: None,
            file_info: HashMap::new(),
        }
    }
    /// 设置文件的mime类型
    ///
    /// 不设置时将自动探测内容类型，探测失败则交由B2自行判定
    pub fn set_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_owned());
        self
    }
    /// 设置需要附加的自定义信息，将以 X-Bz-Info- 请求头的形式携带
    pub fn set_info(mut self, key: &str, value: &str) -> Self {
        self.file_info.insert(key.to_owned(), value.to_owned());
        self
    }
    //组装上传请求，上传头中的sha1校验值必须在发送前算出
    pub(crate) fn build_request(&self, content: &[u8], content_type: &str) -> Result<B2Request, Error> {
        let upload_url = self.bucket.b2.upload_url().ok_or(Error::UploadNotReady)?;
        let upload_token = self
            .bucket
            .b2
            .upload_authorization_token()
            .ok_or(Error::UploadNotReady)?;
        //计算内容的sha1校验值
        let sha1 = to_hex(digest(&SHA1_FOR_LEGACY_USE_ONLY, content).as_ref());
        let mut req = B2Request::new(Method::POST, upload_url, self.bucket.b2.timeout());
        req.insert_header(header::AUTHORIZATION, upload_token);
        req.insert_header("X-Bz-File-Name", url_encode(&self.file_name));
        req.insert_header(header::CONTENT_TYPE, content_type);
        req.insert_header("X-Bz-Content-Sha1", sha1);
        //插入自定义信息
        for (key, value) in self.file_info.iter() {
            req.insert_header(format!("X-Bz-Info-{}", key), url_encode(value));
        }
        req.set_body(Bytes::copy_from_slice(content));
        Ok(req)
    }
    /// 将内存中的数据上传到B2
    pub async fn send_content(self, content: &[u8]) -> Result<FileInfo, Error> {
        //读取内容大小
        if content.len() as u64 >= 5_000_000_000 {
            return Err(Error::FileTooBig);
        }
        //生成文件类型
        let content_type = match &self.content_type {
            Some(content_type) => content_type.clone(),
            None => infer::get(content)
                .map(|val| val.mime_type().to_owned())
                .or_else(|| {
                    mime_guess::from_path(&self.file_name)
                        .first_raw()
                        .map(|val| val.to_owned())
                })
                .unwrap_or_else(|| "b2/x-auto".to_owned()),
        };
        //构建http请求
        let response = self.build_request(content, &content_type)?.send_to_b2().await?;
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
    /// 将磁盘中的文件上传到B2
    ///
    /// 不支持网络路径，如果需要上传smb\nfs等网络存储中的文件，请先挂载到本地
    pub async fn send_file(mut self, file: &str) -> Result<FileInfo, Error> {
        //判断路径
        if file.contains("://") {
            return Err(Error::PathNotSupported);
        }
        //生成文件类型
        if self.content_type.is_none() {
            self.content_type = infer::get_from_path(file)?.map(|val| val.mime_type().to_owned());
        }
        //读取文件内容
        let content = tokio::fs::read(file).await?;
        self.send_content(&content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::B2Session;

    fn ready_bucket() -> B2Bucket {
        let mut session = B2Session::new("acct1", "key1");
        session.process_get_upload_url(
            r#"{"bucketId":"b1","uploadUrl":"https://pod.example.com/b2api/v1/b2_upload_file/b1/x","authorizationToken":"uptok"}"#,
        );
        B2Bucket::new(session, "b1")
    }

    #[test]
    fn test_upload_request_headers_and_body() {
        let builder = UploadFile::new(ready_bucket(), "yawning_cat.jpg");
        let content = b"hello world";
        let req = builder.build_request(content, "image/jpeg").unwrap();
        assert_eq!(req.headers.len(), 4);
        assert_eq!(req.headers.get("authorization").map(String::as_str), Some("uptok"));
        assert_eq!(
            req.headers.get("X-Bz-File-Name").map(String::as_str),
            Some("yawning_cat.jpg")
        );
        assert_eq!(
            req.headers.get("content-type").map(String::as_str),
            Some("image/jpeg")
        );
        assert_eq!(
            req.headers.get("X-Bz-Content-Sha1").map(String::as_str),
            Some("2aae6c35c94fcfb415dbe95f408b9ce91ee846ed")
        );
        assert_eq!(&req.body[..], content);
        assert_eq!(
            req.uri(),
            "https://pod.example.com/b2api/v1/b2_upload_file/b1/x"
        );
    }

    #[test]
    fn test_file_name_encoded() {
        let builder = UploadFile::new(ready_bucket(), "kitten pics/cat 1.jpg");
        let req = builder.build_request(b"", "b2/x-auto").unwrap();
        assert_eq!(
            req.headers.get("X-Bz-File-Name").map(String::as_str),
            Some("kitten%20pics/cat%201.jpg")
        );
    }

    #[test]
    fn test_upload_not_ready() {
        let bucket = B2Bucket::new(B2Session::new("acct1", "key1"), "b1");
        let builder = UploadFile::new(bucket, "yawning_cat.jpg");
        assert!(matches!(
            builder.build_request(b"hello world", "image/jpeg"),
            Err(Error::UploadNotReady)
        ));
    }
}
