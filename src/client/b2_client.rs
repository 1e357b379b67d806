use super::{Authorization, AuthorizeAccount, CreateBucket, ListBuckets};
use crate::{file::DownloadFileByName, session::B2Session, B2Bucket, B2File, Error};
use std::time::Duration;

/// B2服务入口，持有会话状态，实现了账户授权和存储空间管理两类API
#[derive(Debug, Clone)]
pub struct B2Client {
    pub(crate) b2: B2Session,
}

impl B2Client {
    /// 初始化一个B2Client容器，以便后续使用
    ///
    /// - account_id ： B2账户ID
    /// - application_key：B2应用密钥
    ///
    pub fn new(account_id: &str, application_key: &str) -> Self {
        B2Client {
            b2: B2Session::new(account_id, application_key),
        }
    }
    /// 设置请求超时时间，默认为30秒
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.b2.set_timeout(timeout);
        self
    }
    /// 读取当前会话状态
    pub fn session(&self) -> &B2Session {
        &self.b2
    }
    /// 以可变方式读取当前会话状态，可用于手动处理原始响应消息体
    pub fn session_mut(&mut self) -> &mut B2Session {
        &mut self.b2
    }
    /// 初始化账户授权请求
    pub fn authorize_account(&self) -> AuthorizeAccount {
        AuthorizeAccount::new(self.b2.clone())
    }
    /// 完成账户授权，并将获取到的令牌与服务地址保存到会话中
    ///
    /// 后续所有接口都依赖本方法写入的会话字段，必须最先调用
    pub async fn authorize(&mut self) -> Result<Authorization, Error> {
        let auth = self.authorize_account().send().await?;
        self.b2.apply_authorization(&auth);
        Ok(auth)
    }
    /// 创建存储空间
    pub fn create_bucket(&self, bucket_name: &str) -> CreateBucket {
        CreateBucket::new(self.b2.clone(), bucket_name)
    }
    /// 查询已创建的所有存储空间
    pub fn list_buckets(&self) -> ListBuckets {
        ListBuckets::new(self.b2.clone())
    }
    /// 初始化B2Bucket
    pub fn bucket(&self, bucket_id: &str) -> B2Bucket {
        B2Bucket::new(self.b2.clone(), bucket_id)
    }
    /// 初始化B2File
    pub fn file(&self, file_id: &str) -> B2File {
        B2File::new(self.b2.clone(), file_id)
    }
    /// 通过存储空间名称和文件名下载文件
    pub fn download_file_by_name(&self, bucket_name: &str, file_name: &str) -> DownloadFileByName {
        DownloadFileByName::new(self.b2.clone(), bucket_name, file_name)
    }
}
