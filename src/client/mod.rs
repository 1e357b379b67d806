//! 包括账户身份、授权信息与存储空间管理的基础服务

pub use self::authorize_account::{Authorization, AuthorizeAccount};
pub use self::b2_client::B2Client;
pub use self::create_bucket::CreateBucket;
pub use self::list_buckets::ListBuckets;

mod authorize_account;
mod b2_client;
mod create_bucket;
mod list_buckets;
