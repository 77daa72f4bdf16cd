use super::table::TableClient;
use crate::error::{DiskError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

/// Blocking client for a PostgREST table (the REST face of a Supabase project).
///
/// Requests go to `{base_url}/rest/v1/{table}`. Mutations ask for
/// `return=representation` so the affected rows come back in the response.
pub struct PostgrestClient {
    http: Client,
    base_url: String,
    table: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: &str, api_key: &str, table: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    fn rows(&self, action: &str, response: Response) -> Result<Vec<Value>> {
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            tracing::warn!(%status, action, table = %self.table, "remote store rejected request");
            return Err(DiskError::Store(format!(
                "{} on table '{}' failed with {}: {}",
                action, self.table, status, body
            )));
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

impl TableClient for PostgrestClient {
    fn select_all(&self) -> Result<Vec<Value>> {
        let response = self
            .authorized(self.http.get(self.table_url()))
            .query(&[("select", "*")])
            .send()?;
        self.rows("select", response)
    }

    fn select_by_id(&self, id: &str) -> Result<Vec<Value>> {
        let response = self
            .authorized(self.http.get(self.table_url()))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))])
            .send()?;
        self.rows("select", response)
    }

    fn insert(&self, row: &Value) -> Result<Vec<Value>> {
        let response = self
            .authorized(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(row)
            .send()?;
        self.rows("insert", response)
    }

    fn update_by_id(&self, id: &str, row: &Value) -> Result<Vec<Value>> {
        let response = self
            .authorized(self.http.patch(self.table_url()))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(row)
            .send()?;
        self.rows("update", response)
    }

    fn delete_by_id(&self, id: &str) -> Result<Vec<Value>> {
        let response = self
            .authorized(self.http.delete(self.table_url()))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .send()?;
        self.rows("delete", response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentItem;
    use crate::store::remote::RemoteStore;
    use crate::store::DiskRepository;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    struct Captured {
        request_line: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    /// Answers one HTTP request with `status` and `body`, returning what it saw.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    headers.push((k.trim().to_lowercase(), v.trim().to_string()));
                }
            }
            let length = headers
                .iter()
                .find(|(k, _)| k == "content-length")
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut raw_body = vec![0; length];
            reader.read_exact(&mut raw_body).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();

            Captured {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(raw_body).unwrap(),
            }
        });
        (url, handle)
    }

    fn client(url: &str) -> PostgrestClient {
        PostgrestClient::new(url, "secret", "disks", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn select_by_id_sends_auth_headers_and_filter() {
        let (url, server) = serve_once("200 OK", r#"[{"id": "u-1", "name": "SSD"}]"#);
        let rows = client(&url).select_by_id("u-1").unwrap();
        let seen = server.join().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            seen.request_line,
            "GET /rest/v1/disks?select=*&id=eq.u-1 HTTP/1.1"
        );
        assert_eq!(seen.header("apikey"), Some("secret"));
        assert_eq!(seen.header("authorization"), Some("Bearer secret"));
    }

    #[test]
    fn insert_posts_row_without_id() {
        let (url, server) = serve_once(
            "201 Created",
            r#"[{"id": "u-9", "name": "SSD", "total_capacity_gb": 500, "contents": [{"description": "OS", "size_gb": 100}]}]"#,
        );
        let mut store = RemoteStore::new(client(&url));
        let disk = store
            .add("SSD", 500, vec![ContentItem::new("OS", 100)])
            .unwrap();
        let seen = server.join().unwrap();

        assert_eq!(disk.id, "u-9");
        assert_eq!(disk.free_space_gb(), 400);
        assert_eq!(seen.request_line, "POST /rest/v1/disks HTTP/1.1");
        assert_eq!(seen.header("prefer"), Some("return=representation"));
        assert_eq!(seen.header("apikey"), Some("secret"));

        let sent: Value = serde_json::from_str(&seen.body).unwrap();
        assert!(sent.get("id").is_none());
        assert_eq!(sent["name"], "SSD");
        assert_eq!(sent["contents"][0]["size_gb"], 100);
    }

    #[test]
    fn update_patches_by_id() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id": "u-1", "name": "NAS", "total_capacity_gb": 20, "contents": []}]"#,
        );
        let mut store = RemoteStore::new(client(&url));
        let updated = store.update("u-1", "NAS", 20, vec![]).unwrap().unwrap();
        let seen = server.join().unwrap();

        assert_eq!(updated.name, "NAS");
        assert_eq!(seen.request_line, "PATCH /rest/v1/disks?id=eq.u-1 HTTP/1.1");
        assert_eq!(seen.header("prefer"), Some("return=representation"));
        assert_eq!(seen.header("authorization"), Some("Bearer secret"));
    }

    #[test]
    fn delete_of_unknown_id_is_false() {
        let (url, server) = serve_once("200 OK", "[]");
        let mut store = RemoteStore::new(client(&url));
        assert!(!store.delete("u-404").unwrap());
        let seen = server.join().unwrap();

        assert_eq!(seen.request_line, "DELETE /rest/v1/disks?id=eq.u-404 HTTP/1.1");
        assert_eq!(seen.header("prefer"), Some("return=representation"));
    }

    #[test]
    fn rejected_request_is_a_store_error_with_status_and_body() {
        let (url, server) = serve_once(
            "400 Bad Request",
            r#"{"code": "22P02", "message": "invalid input syntax for type uuid"}"#,
        );
        let result = client(&url).select_all();
        let seen = server.join().unwrap();

        assert_eq!(seen.request_line, "GET /rest/v1/disks?select=* HTTP/1.1");
        match result {
            Err(DiskError::Store(message)) => {
                assert!(message.contains("400"), "{}", message);
                assert!(message.contains("22P02"), "{}", message);
            }
            other => panic!("expected store error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let client = PostgrestClient::new(
            "https://example.supabase.co/",
            "key",
            "disks",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.table_url(), "https://example.supabase.co/rest/v1/disks");
    }

    #[test]
    fn unreachable_host_is_an_error() {
        // Port 9 on localhost is the discard port; nothing should answer HTTP there.
        let client = PostgrestClient::new(
            "http://127.0.0.1:9",
            "key",
            "disks",
            Duration::from_millis(500),
        )
        .unwrap();
        assert!(client.select_all().is_err());
    }
}
