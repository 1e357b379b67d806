use super::{
    GetUploadUrl, HideFile, ListFileNames, ListFileVersions, UpdateBucket, UploadFile, UploadUrl,
};
use crate::{common::BucketType, session::B2Session, Error};
use std::borrow::Cow;

/// B2存储空间，实现了获取上传地址、上传文件、文件列表等API
#[derive(Debug, Clone)]
pub struct B2Bucket {
    pub(crate) b2: B2Session,
    pub(crate) bucket_id: Cow<'static, str>,
}

impl B2Bucket {
    pub(crate) fn new(b2: B2Session, bucket_id: impl ToString) -> Self {
        B2Bucket {
            b2,
            bucket_id: bucket_id.to_string().into(),
        }
    }
    /// 修改存储空间的访问权限
    pub fn update_bucket(&self, bucket_type: BucketType) -> UpdateBucket {
        UpdateBucket::new(self.clone(), bucket_type)
    }
    /// 获取上传地址
    pub fn get_upload_url(&self) -> GetUploadUrl {
        GetUploadUrl::new(self.clone())
    }
    /// 获取上传地址，并将上传地址与上传令牌保存到会话中，供后续上传使用
    pub async fn prepare_upload(&mut self) -> Result<UploadUrl, Error> {
        let upload = self.get_upload_url().send().await?;
        self.b2.apply_upload_url(&upload);
        Ok(upload)
    }
    /// 上传文件
    pub fn upload_file(&self, file_name: impl ToString) -> UploadFile {
        UploadFile::new(self.clone(), file_name)
    }
    /// 查询存储空间中的文件名列表
    pub fn list_file_names(&self) -> ListFileNames {
        ListFileNames::new(self.clone())
    }
    /// 查询存储空间中的全部文件版本
    pub fn list_file_versions(&self) -> ListFileVersions {
        ListFileVersions::new(self.clone())
    }
    /// 隐藏指定文件，隐藏后文件不再出现在文件名列表中，但历史版本仍然保留
    pub fn hide_file(&self, file_name: impl ToString) -> HideFile {
        HideFile::new(self.clone(), file_name)
    }
}
