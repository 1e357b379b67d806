use crate::{bucket::UploadUrl, client::Authorization};
use serde_derive::Deserialize;
use std::{borrow::Cow, time::Duration};

//授权服务器地址，固定不变，其余地址均由授权响应下发
pub(crate) const AUTH_SERVER: &str = "api.backblazeb2.com";

//默认请求超时时间
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// B2会话状态
///
/// 保存账户身份、各类服务地址和授权令牌，是一次完整调用流程中唯一的可变状态
///
/// 除账户身份外，所有字段初始均为空，由之前步骤的响应消息逐步填充；
/// 依赖这些字段的接口在字段为空时会返回明确的未授权错误，而不会发出残缺的请求
///
/// 会话为单持有者设计，各接口构建器持有会话的值拷贝，不支持多个流程并发共用
#[derive(Debug, Clone)]
pub struct B2Session {
    account_id: Cow<'static, str>,
    application_key: Cow<'static, str>,
    api_url: Option<String>,
    download_url: Option<String>,
    upload_url: Option<String>,
    account_authorization_token: Option<String>,
    upload_authorization_token: Option<String>,
    timeout: Duration,
}

impl B2Session {
    /// 初始化一个新的会话，仅包含账户身份
    pub fn new(account_id: &str, application_key: &str) -> Self {
        B2Session {
            account_id: account_id.to_owned().into(),
            application_key: application_key.to_owned().into(),
            api_url: None,
            download_url: None,
            upload_url: None,
            account_authorization_token: None,
            upload_authorization_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
    /// 设置请求超时时间
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    // -------------------------- 读取会话字段 --------------------------
    pub fn account_id(&self) -> &str {
        &self.account_id
    }
    pub fn application_key(&self) -> &str {
        &self.application_key
    }
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }
    pub fn upload_url(&self) -> Option<&str> {
        self.upload_url.as_deref()
    }
    pub fn account_authorization_token(&self) -> Option<&str> {
        self.account_authorization_token.as_deref()
    }
    pub fn upload_authorization_token(&self) -> Option<&str> {
        self.upload_authorization_token.as_deref()
    }
    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    // -------------------------- 吸收响应内容 --------------------------
    //以下方法只更新响应中实际存在的字段，缺失或无法解析的字段保持原值，
    //不会写入任何残缺数据，也不会报错

    /// 吸收已解析的账户授权结果
    pub fn apply_authorization(&mut self, auth: &Authorization) {
        if let Some(download_url) = &auth.download_url {
            self.download_url = Some(download_url.clone());
        }
        if let Some(api_url) = &auth.api_url {
            self.api_url = Some(api_url.clone());
        }
        if let Some(token) = &auth.authorization_token {
            self.account_authorization_token = Some(token.clone());
        }
    }
    /// 吸收已解析的上传地址结果
    pub fn apply_upload_url(&mut self, upload: &UploadUrl) {
        if let Some(upload_url) = &upload.upload_url {
            self.upload_url = Some(upload_url.clone());
        }
        if let Some(token) = &upload.authorization_token {
            self.upload_authorization_token = Some(token.clone());
        }
    }
    /// 处理账户授权接口的原始响应消息体
    pub fn process_authorization(&mut self, json_str: &str) {
        if let Ok(auth) = serde_json::from_str::<Authorization>(json_str) {
            self.apply_authorization(&auth);
        }
    }
    /// 处理上传地址接口的原始响应消息体
    pub fn process_get_upload_url(&mut self, json_str: &str) {
        if let Ok(upload) = serde_json::from_str::<UploadUrl>(json_str) {
            self.apply_upload_url(&upload);
        }
    }
    /// 处理存储空间级授权接口的原始响应消息体，刷新账户授权令牌
    pub fn process_bucket_authorization(&mut self, json_str: &str) {
        if let Ok(auth) = serde_json::from_str::<BucketAuthorization>(json_str) {
            if let Some(token) = auth.authorization_token {
                self.account_authorization_token = Some(token);
            }
        }
    }
}

//存储空间级授权响应，仅携带新的授权令牌
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BucketAuthorization {
    #[serde(default)]
    authorization_token: Option<String>,
}
