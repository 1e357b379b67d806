//!
//! Backblaze B2云存储（B2 Cloud Storage）是Backblaze对外提供的低成本对象存储服务。
//!
//! 没有复杂的结构，仅仅为快速调用而实现，设计遵循极简、实用原则，通过 B2Client - B2Bucket - B2File 三层结构，实现了官方API的调用链：
//! 账户授权 → 管理存储空间 → 获取上传地址 → 上传文件 → 查询文件列表 → 下载文件。
//!
//! 每一步接口都依赖之前步骤写入会话的令牌或地址，缺少前置条件时接口会返回明确的错误，而不会发出残缺的请求。
//!
//!
//! ##### 初始化并完成账户授权
//! ```no_run
//! # async fn run() -> Result<(), backblaze_b2_rs::Error> {
//! use backblaze_b2_rs::B2Client;
//!
//! let mut client = B2Client::new("Your Account ID", "Your Application Key");
//! client.authorize().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ##### 创建存储空间
//! ```no_run
//! # async fn run(client: backblaze_b2_rs::B2Client) -> Result<(), backblaze_b2_rs::Error> {
//! use backblaze_b2_rs::common::BucketType;
//!
//! let bucket = client
//!     .create_bucket("your-bucket-name")
//!     .set_bucket_type(BucketType::AllPrivate)
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ##### 查询存储空间列表
//! ```no_run
//! # async fn run(client: backblaze_b2_rs::B2Client) -> Result<(), backblaze_b2_rs::Error> {
//! let buckets = client.list_buckets().send().await?;
//! let bucket = buckets
//!     .iter()
//!     .find(|bucket| bucket.bucket_name.eq_ignore_ascii_case("your-bucket-name"));
//! # Ok(())
//! # }
//! ```
//!
//! ##### 上传文件
//! ```no_run
//! # async fn run(client: backblaze_b2_rs::B2Client) -> Result<(), backblaze_b2_rs::Error> {
//! let mut bucket = client.bucket("your-bucket-id");
//! bucket.prepare_upload().await?;
//! let result = bucket.upload_file("yawning_cat.jpg").send_file("Your File Path").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ##### 查询文件列表并下载文件
//! ```no_run
//! # async fn run(client: backblaze_b2_rs::B2Client) -> Result<(), backblaze_b2_rs::Error> {
//! let bucket = client.bucket("your-bucket-id");
//! let file_list = bucket.list_file_names().set_max_file_count(100).send().await?;
//! if let Some(file) = file_list.files.first() {
//!     let content = client.file(&file.file_id).download().send().await?;
//! }
//! # Ok(())
//! # }
//! ```

#[doc(inline)]
pub use crate::bucket::B2Bucket;
#[doc(inline)]
pub use crate::client::B2Client;
#[doc(inline)]
pub use crate::error::Error;
#[doc(inline)]
pub use crate::file::B2File;
#[doc(inline)]
pub use crate::session::B2Session;

pub mod bucket;
pub mod client;
pub mod common;
mod error;
pub mod file;
mod request;
pub mod session;
