//! 公共数据定义
//!
//!
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt};

// -------------------------- 公共方法 --------------------------
//编码查询参数值与文件名，保留B2允许明文传输的字符
const URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'/')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
pub(crate) fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, URL_ENCODE).to_string()
}

//字节串转十六进制小写字符串，用于X-Bz-Content-Sha1
pub(crate) fn to_hex(input: &[u8]) -> String {
    input.iter().map(|byte| format!("{:02x}", byte)).collect()
}

// -------------------------- 公共数据 --------------------------

/// 存储空间的访问权限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketType {
    /// 公共读，存储空间中的文件可以被匿名下载
    #[serde(rename = "allPublic")]
    AllPublic,
    /// 私有，下载请求必须携带授权令牌
    #[serde(rename = "allPrivate")]
    AllPrivate,
}
impl fmt::Display for BucketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketType::AllPublic => f.write_str("allPublic"),
            BucketType::AllPrivate => f.write_str("allPrivate"),
        }
    }
}

/// 存储空间信息
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// 所属账户ID
    #[serde(default)]
    pub account_id: Option<String>,
    /// 存储空间ID，后续文件操作均以此为准
    pub bucket_id: String,
    /// 存储空间名称，全局唯一
    pub bucket_name: String,
    /// 访问权限
    pub bucket_type: BucketType,
}

/// 文件列表中的单个文件版本信息
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersion {
    /// 文件ID
    pub file_id: String,
    /// 文件名
    pub file_name: String,
    /// 动作类型，upload代表正常文件，hide代表隐藏标记
    #[serde(default)]
    pub action: Option<String>,
    /// 文件大小，单位字节
    #[serde(default)]
    pub size: Option<u64>,
    /// 上传时间，毫秒时间戳
    #[serde(default)]
    pub upload_timestamp: Option<i64>,
}
impl FileVersion {
    /// 将上传时间转换为日历时间
    pub fn upload_time(&self) -> Option<DateTime<Utc>> {
        self.upload_timestamp.and_then(DateTime::from_timestamp_millis)
    }
}

/// 文件的详细元信息，上传和查询接口均返回此结构
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// 文件ID
    pub file_id: String,
    /// 文件名
    pub file_name: String,
    /// 所属账户ID
    #[serde(default)]
    pub account_id: Option<String>,
    /// 所属存储空间ID
    #[serde(default)]
    pub bucket_id: Option<String>,
    /// 文件内容大小，单位字节
    #[serde(default)]
    pub content_length: Option<u64>,
    /// 文件内容的SHA1校验值
    #[serde(default)]
    pub content_sha1: Option<String>,
    /// 文件的mime类型
    #[serde(default)]
    pub content_type: Option<String>,
    /// 上传时附加的自定义信息
    #[serde(default)]
    pub file_info: HashMap<String, String>,
}

// -------------------------- 响应内容检索 --------------------------
//以下方法直接对原始响应消息体做检索，消息体无法解析或目标不存在时返回None，
//调用方应以None作为唯一的失败信号

/// 从存储空间列表的响应消息体中取出第一个存储空间
pub fn first_bucket(json_str: &str) -> Option<Bucket> {
    let value: Value = serde_json::from_str(json_str).ok()?;
    let buckets = value.get("buckets")?.as_array()?;
    buckets
        .iter()
        .find_map(|bucket| serde_json::from_value(bucket.clone()).ok())
}

/// 从存储空间列表的响应消息体中查找指定名称的存储空间
///
/// 名称比较不区分大小写，返回列表顺序中的第一个匹配项
pub fn find_bucket_with_name(json_str: &str, bucket_name: &str) -> Option<Bucket> {
    let value: Value = serde_json::from_str(json_str).ok()?;
    let buckets = value.get("buckets")?.as_array()?;
    buckets
        .iter()
        .filter_map(|bucket| serde_json::from_value::<Bucket>(bucket.clone()).ok())
        .find(|bucket| bucket.bucket_name.eq_ignore_ascii_case(bucket_name))
}

/// 从单个文件的响应消息体中取出文件ID
pub fn file_id(json_str: &str) -> Option<String> {
    let value: Value = serde_json::from_str(json_str).ok()?;
    Some(value.get("fileId")?.as_str()?.to_owned())
}

/// 从文件列表的响应消息体中查找指定文件名对应的文件ID
///
/// 文件名比较不区分大小写，返回列表顺序中的第一个匹配项
pub fn find_first_file_id_for_name(json_str: &str, file_name: &str) -> Option<String> {
    let value: Value = serde_json::from_str(json_str).ok()?;
    let files = value.get("files")?.as_array()?;
    files
        .iter()
        .filter_map(|file| serde_json::from_value::<FileVersion>(file.clone()).ok())
        .find(|file| file.file_name.eq_ignore_ascii_case(file_name))
        .map(|file| file.file_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_bucket_with_name_case_insensitive() {
        let json_str = r#"{"buckets":[
            {"bucketId":"b1","bucketName":"Photos","bucketType":"allPrivate"},
            {"bucketId":"b2","bucketName":"photos","bucketType":"allPublic"}
        ]}"#;
        let bucket = find_bucket_with_name(json_str, "photos").unwrap();
        assert_eq!(bucket.bucket_id, "b1");
        assert_eq!(bucket.bucket_name, "Photos");
        assert_eq!(bucket.bucket_type, BucketType::AllPrivate);
    }

    #[test]
    fn test_find_bucket_with_name_missing() {
        let json_str = r#"{"buckets":[{"bucketId":"b1","bucketName":"Photos","bucketType":"allPrivate"}]}"#;
        assert!(find_bucket_with_name(json_str, "videos").is_none());
        assert!(find_bucket_with_name("not json", "photos").is_none());
        assert!(find_bucket_with_name(r#"{"other":1}"#, "photos").is_none());
    }

    #[test]
    fn test_first_bucket() {
        let json_str = r#"{"buckets":[
            {"bucketId":"b1","bucketName":"first","bucketType":"allPrivate"},
            {"bucketId":"b2","bucketName":"second","bucketType":"allPrivate"}
        ]}"#;
        assert_eq!(first_bucket(json_str).unwrap().bucket_id, "b1");
        assert!(first_bucket(r#"{"buckets":[]}"#).is_none());
    }

    #[test]
    fn test_find_first_file_id_for_name() {
        let json_str = r#"{"files":[
            {"fileName":"a.jpg","fileId":"1"},
            {"fileName":"A.JPG","fileId":"2"}
        ]}"#;
        assert_eq!(
            find_first_file_id_for_name(json_str, "a.jpg").as_deref(),
            Some("1")
        );
        assert!(find_first_file_id_for_name(json_str, "b.jpg").is_none());
        assert!(find_first_file_id_for_name("{", "a.jpg").is_none());
    }

    #[test]
    fn test_file_id() {
        assert_eq!(
            file_id(r#"{"fileId":"4_z27c88f1d182b150646ff0b16_f1004ba650fe24e6b_d20150809"}"#)
                .as_deref(),
            Some("4_z27c88f1d182b150646ff0b16_f1004ba650fe24e6b_d20150809")
        );
        assert!(file_id(r#"{"fileName":"a.jpg"}"#).is_none());
    }

    #[test]
    fn test_url_encode() {
        assert_eq!(url_encode("yawning_cat.jpg"), "yawning_cat.jpg");
        assert_eq!(url_encode("kitten pics/cat 1.jpg"), "kitten%20pics/cat%201.jpg");
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x2a, 0xae, 0x6c]), "2aae6c");
    }
}
