use crate::{
    common::FileVersion, error::normal_error, request::B2Request, B2Bucket, Error,
};
use hyper::{body::to_bytes, header, Method};
use serde_derive::{Deserialize, Serialize};

//请求参数，数量上限未设置时整体省略
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListFileNamesParams<'a> {
    bucket_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_file_count: Option<i32>,
}

// 返回内容
/// 文件名列表查询结果
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNameList {
    /// 文件列表，每个文件只出现最新版本
    pub files: Vec<FileVersion>,
    /// 下一页的起始文件名，为空代表已到达末尾
    #[serde(default)]
    pub next_file_name: Option<String>,
}

/// 查询存储空间中的文件名列表
///
/// 按文件名字母排序返回，每个文件只返回最新版本
///
/// 具体详情查阅 [B2官方文档](https://www.backblaze.com/b2/docs/b2_list_file_names.html)
pub struct ListFileNames {
    bucket: B2Bucket,
    start_file_name: Option<String>,
    max_file_count: i32,
}

impl ListFileNames {
    pub(super) fn new(bucket: B2Bucket) -> Self {
        ListFileNames {
            bucket,
            start_file_name: None,
            max_file_count: -1,
        }
    }
    /// 设定结果从此文件名开始按字母排序返回。如果不设定，则从头开始返回数据。
    pub fn set_start_file_name(mut self, start_file_name: impl ToString) -> Self {
        self.start_file_name = Some(start_file_name.to_string());
        self
    }
    /// 限定此次返回文件的最大数量
    ///
    /// 负数代表未设置，此时该参数不会随请求发送，返回数量由B2决定
    pub fn set_max_file_count(mut self, max_file_count: i32) -> Self {
        self.max_file_count = max_file_count;
        self
    }
    //组装请求参数
    fn body(&self) -> Vec<u8> {
        serde_json::to_vec(&ListFileNamesParams {
            bucket_id: &self.bucket.bucket_id,
            start_file_name: self.start_file_name.as_deref(),
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
            format!("{}/b2api/v1/b2_list_file_names", api_url),
            self.bucket.b2.timeout(),
        );
        req.insert_header(header::AUTHORIZATION, token);
        req.set_body(self.body().into());
        Ok(req)
    }
    /// 发送请求
    pub async fn send(self) -> Result<FileNameList, Error> {
        //构建http请求
        let response = self.build_request()?.send_to_b2().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let response_bytes = to_bytes(response.into_body())
                    .await
                    .map_err(|_| Error::B2InvalidResponse(None))?;
                let file_list: FileNameList = serde_json::from_slice(&response_bytes)
                    .map_err(|_| Error::B2InvalidResponse(Some(response_bytes)))?;
                Ok(file_list)
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

    fn builder() -> ListFileNames {
        ListFileNames::new(B2Bucket::new(B2Session::new("acct1", "key1"), "b1"))
    }

    #[test]
    fn test_body_default() {
        let body: Value = serde_json::from_slice(&builder().body()).unwrap();
        assert_eq!(body, json!({"bucketId": "b1"}));
    }

    #[test]
    fn test_negative_max_file_count_omitted() {
        let body: Value =
            serde_json::from_slice(&builder().set_max_file_count(-1).body()).unwrap();
        assert!(body.get("maxFileCount").is_none());
        let body: Value =
            serde_json::from_slice(&builder().set_max_file_count(-100).body()).unwrap();
        assert!(body.get("maxFileCount").is_none());
    }

    #[test]
    fn test_zero_and_positive_max_file_count_sent() {
        let body: Value = serde_json::from_slice(&builder().set_max_file_count(0).body()).unwrap();
        assert_eq!(body.get("maxFileCount").unwrap(), 0);
        let body: Value =
            serde_json::from_slice(&builder().set_max_file_count(200).body()).unwrap();
        assert_eq!(body.get("maxFileCount").unwrap(), 200);
    }

    #[test]
    fn test_start_file_name() {
        let body: Value =
            serde_json::from_slice(&builder().set_start_file_name("cat.jpg").body()).unwrap();
        assert_eq!(
            body,
            json!({"bucketId": "b1", "startFileName": "cat.jpg"})
        );
    }
}
