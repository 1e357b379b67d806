use crate::{
    common::FileVersion, error::normal_error, request::B2Request, B2Bucket, Error,
};
use hyper::{body::to_bytes, header, Method};
use serde_derive::{Deserialize, Serialize};

//请求参数，数量上限未设置时整体省略
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListFileVersionsParams<'a> {
    bucket_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_file_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_file_count: Option<i32>,
}

// 返回内容
/// 文件版本列表查询结果
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersionList {
    /// 文件版本列表，同一文件的多个版本会分别出现
    pub files: Vec<FileVersion>,
    /// 下一页的起始文件名，为空代表已到达末尾
    #[serde(default)]
    pub next_file_name: Option<String>,
    /// 下一页的起始文件ID，与起始文件名配对使用
    #[serde(default)]
    pub next_file_id: Option<String>,
}

/// 查询存储空间中的全部文件版本
///
/// 按文件名、上传时间排序返回，包含隐藏标记在内的所有历史版本
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_list_file_versions.html)
pub struct ListFileVersions {
    bucket: B2Bucket,
    start_file_name: Option<String>,
    start_file_id: Option<String>,
    max_file_count: i32,
}

impl ListFileVersions {
    pub(super) fn new(bucket: B2Bucket) -> Self {
        ListFileVersions {
            bucket,
            start_file_name: None,
            start_file_id: None,
            max_file_count: -1,
        }
    }
    /// 设定结果从此文件名开始按字母排序返回
    pub fn set_start_file_name(mut self, start_file_name: impl ToString) -> Self {
        self.start_file_name = Some(start_file_name.to_string());
        self
    }
    /// 设定结果从此文件ID开始返回，必须与起始文件名同时设置
    pub fn set_start_file_id(mut self, start_file_id: impl ToString) -> Self {
        self.start_file_id = Some(start_file_id.to_string());
        self
    }
    /// 限定此次返回文件版本的最大数量
    ///
    /// 负数代表未设置，此时该参数不会随请求发送，返回数量由B2决定
    pub fn set_max_file_count(mut self, max_file_count: i32) -> Self {
        self.max_file_count = max_file_count;
        self
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&ListFileVersionsParams {
            bucket_id: &self.bucket.bucket_id,
            start_file_name: self.start_file_name.as_deref(),
            start_file_id: self.start_file_id.as_deref(),
            max_file_count: (self.max_file_count > -1).then_some(self.max_file_count),
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
            format!("{}/b2api/v1/b2_list_file_versions", api_url),
            self.bucket.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<FileVersionList, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let version_list: FileVersionList = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(version_list)
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
        let builder = ListFileVersions::new(bucket)
            .set_start_file_name("cat.jpg")
            .set_start_file_id("4_zb1_f1")
            .set_max_file_count(10);
        let body: Value = serde_json::from_slice(&builder.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "bucketId": "b1",
                "startFileName": "cat.jpg",
                "startFileId": "4_zb1_f1",
                "maxFileCount": 10
            })
        );
    }

    #[test]
    fn test_negative_max_file_count_omitted() {
        let bucket = B2Bucket::new(B2Session::new("acct1", "key1"), "b1");
        let body: Value =
            serde_json::from_slice(&ListFileVersions::new(bucket).body()).unwrap();
        assert_eq!(body, json!({"bucketId": "b1"}));
    }
}
