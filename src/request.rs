use crate::{common::url_encode, Error};
use bytes::Bytes;
use hyper::{Body, Client, Method, Request, Response};
use hyper_tls::HttpsConnector;
use log::{debug, error};
use std::{collections::HashMap, time::Duration};

//B2请求基础结构，负责整个crate中唯一的一次网络往返
#[derive(Debug)]
pub(crate) struct B2Request {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub querys: HashMap<String, String>,
    pub body: Bytes,
    pub timeout: Duration,
}

impl B2Request {
    pub fn new(method: Method, url: impl ToString, timeout: Duration) -> Self {
        B2Request {
            method,
            url: url.to_string(),
            headers: HashMap::with_capacity(10),
            querys: HashMap::with_capacity(10),
            body: Bytes::new(),
            timeout,
        }
    }
    pub fn insert_header(&mut self, key: impl ToString, value: impl ToString) {
        self.headers.insert(key.to_string(), value.to_string());
    }
    pub fn insert_query(&mut self, key: impl ToString, value: impl ToString) {
        self.querys.insert(key.to_string(), value.to_string());
    }
    pub fn set_body(&mut self, body: Bytes) {
        self.body = body;
    }
    pub fn uri(&self) -> String {
        //生成url
        let query = self
            .querys
            .iter()
            .map(|(key, value)| {
                let value = value.to_string();
                if value.is_empty() {
                    key.to_string()
                } else {
                    format!("{}={}", key, url_encode(&value))
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        }
    }
    //执行一次网络往返，响应完成、失败或超时之前不会返回
    pub async fn send_to_b2(self) -> Result<Response<Body>, Error> {
        let uri = self.uri();
        debug!("发送请求：{} {}", self.method, uri);
        //构建http请求
        let mut req = Request::builder().method(&self.method).uri(uri.as_str());
        for (key, value) in self.headers.iter() {
            req = req.header(key.as_str(), value.as_str());
        }
        let request = req.body(Body::from(self.body))?;
        let client = Client::builder().build::<_, Body>(HttpsConnector::new());
        match tokio::time::timeout(self.timeout, client.request(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => {
                error!("请求失败：{}，地址：{}", err, uri);
                Err(Error::HyperError(err))
            }
            Err(_) => {
                error!("请求超时，地址：{}", uri);
                Err(Error::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_without_query() {
        let req = B2Request::new(
            Method::POST,
            "https://api1.example.com/b2api/v1/b2_list_buckets",
            Duration::from_secs(30),
        );
        assert_eq!(req.uri(), "https://api1.example.com/b2api/v1/b2_list_buckets");
    }

    #[test]
    fn test_uri_with_query() {
        let mut req = B2Request::new(
            Method::GET,
            "https://f1.example.com/b2api/v1/b2_download_file_by_id",
            Duration::from_secs(30),
        );
        req.insert_query("fileId", "4_z27c88f1d182b150646ff0b16");
        assert_eq!(
            req.uri(),
            "https://f1.example.com/b2api/v1/b2_download_file_by_id?fileId=4_z27c88f1d182b150646ff0b16"
        );
    }
}
