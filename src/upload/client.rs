use crate::app::event::AppEvent;
use crate::error::RequestError;
use crate::form::result::UploadResult;
use crate::upload::UploadRequest;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use tokio::sync::mpsc;

pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("puzzle-upload/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Spawn an upload task. The outcome always comes back as
/// [`AppEvent::UploadFinished`]; the request is never cancelled.
pub fn spawn_upload(
    client: Client,
    request: UploadRequest,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        let form = request.form;
        let url = request.url.clone();
        let result = send_upload(&client, request).await;
        match &result {
            Ok(r) => tracing::info!(form, %url, complete = %r.complete, "upload finished"),
            Err(e) => tracing::warn!(form, %url, "upload failed: {}", e),
        }
        let _ = event_tx.send(AppEvent::UploadFinished { form, result });
    });
}

pub async fn send_upload(client: &Client, request: UploadRequest) -> Result<UploadResult, RequestError> {
    let method = Method::from_bytes(request.method.to_uppercase().as_bytes())
        .map_err(|_| RequestError::Method(request.method.clone()))?;

    let mut form = Form::new();
    for (name, value) in request.fields {
        form = form.text(name, value);
    }
    if let Some(file) = request.file {
        let bytes = tokio::fs::read(&file.path).await?;
        form = form.part(file.field, Part::bytes(bytes).file_name(file.file_name));
    }

    let response = client
        .request(method, request.url.as_str())
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::result::Outcome;
    use crate::upload::FilePart;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    async fn read_request(sock: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Answer exactly one request with the given status line and body.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let request = read_request(&mut sock).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            sock.write_all(response.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
            request
        });
        (format!("http://{}/2023/day/1", addr), handle)
    }

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    fn request(url: String) -> UploadRequest {
        UploadRequest {
            form: 0,
            method: "post".into(),
            url,
            fields: vec![
                ("level".into(), "1".into()),
                ("puzzle-answer-1".into(), "514579".into()),
            ],
            file: None,
        }
    }

    #[tokio::test]
    async fn test_success_response_decoded() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"complete":1,"runtime":"42ms","free_heap_size_before":1000,"free_heap_size_after":900}"#,
        )
        .await;

        let dir = std::env::temp_dir().join(format!("puzzle-upload-client-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("input.txt");
        std::fs::write(&path, "1721\n979\n366\n").unwrap();

        let mut req = request(url);
        req.file = Some(FilePart {
            field: "puzzle-upload-1".into(),
            path: path.clone(),
            file_name: "input.txt".into(),
        });

        let result = send_upload(&client(), req).await.unwrap();
        assert_eq!(result.outcome(), Outcome::Success);
        assert!(result.message().contains("42ms"));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /2023/day/1 HTTP/1.1"));
        assert!(raw.contains("multipart/form-data; boundary="));
        assert!(raw.contains("name=\"level\""));
        assert!(raw.contains("name=\"puzzle-answer-1\""));
        assert!(raw.contains("514579"));
        assert!(raw.contains("name=\"puzzle-upload-1\"; filename=\"input.txt\""));
        assert!(raw.contains("1721\n979\n366\n"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_error_status() {
        let (url, server) = serve_once("413 Payload Too Large", "Wrong request.").await;
        let err = send_upload(&client(), request(url)).await.unwrap_err();
        assert!(matches!(err, RequestError::Status(413)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (url, server) = serve_once("200 OK", "<html>not json</html>").await;
        let err = send_upload(&client(), request(url)).await.unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = send_upload(&client(), request(format!("http://{}/", addr)))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let mut req = request("http://127.0.0.1:9/".into());
        req.file = Some(FilePart {
            field: "puzzle-upload-1".into(),
            path: "/nonexistent/puzzle-upload/input.txt".into(),
            file_name: "input.txt".into(),
        });
        let err = send_upload(&client(), req).await.unwrap_err();
        assert!(matches!(err, RequestError::Io(_)));
    }

    #[tokio::test]
    async fn test_invalid_method() {
        let mut req = request("http://127.0.0.1:9/".into());
        req.method = "P OST".into();
        let err = send_upload(&client(), req).await.unwrap_err();
        assert!(matches!(err, RequestError::Method(ref m) if m == "P OST"));
    }

    #[tokio::test]
    async fn test_spawn_reports_back() {
        let (url, _server) = serve_once("500 Internal Server Error", "").await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut req = request(url);
        req.form = 1;
        spawn_upload(client(), req, tx);
        match rx.recv().await {
            Some(AppEvent::UploadFinished { form, result }) => {
                assert_eq!(form, 1);
                assert!(matches!(result, Err(RequestError::Status(500))));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
