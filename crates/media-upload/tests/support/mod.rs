//! Scripted HTTP peer for exercising the network clients against a real
//! socket. Each connection receives one scripted reply and is then closed.

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use url::Url;

/// What the peer does once it has read a request.
pub enum Reply {
    /// Answer with a JSON body and optional extra headers.
    Json {
        status: u16,
        body: String,
        headers: Vec<(&'static str, String)>,
    },
    /// Never answer.
    Stall,
}

impl Reply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::Json {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(self, name: &'static str, value: &str) -> Self {
        match self {
            Self::Json {
                status,
                body,
                mut headers,
            } => {
                headers.push((name, value.to_owned()));
                Self::Json {
                    status,
                    body,
                    headers,
                }
            }
            Self::Stall => Self::Stall,
        }
    }
}

/// A request as seen on the wire.
#[derive(Debug)]
pub struct Captured {
    /// Request line and headers, lower-cased.
    pub head: String,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Bind a local peer that plays `replies` in order, one per connection.
pub async fn serve(replies: Vec<Reply>) -> (Url, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub address");
    let base = Url::parse(&format!("http://{addr}/")).expect("stub URL");

    let handle = tokio::spawn(async move {
        let mut captured = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().await.expect("accept");
            captured.push(read_request(&mut stream).await.expect("read request"));
            match reply {
                Reply::Json {
                    status,
                    body,
                    headers,
                } => {
                    let mut response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
                        body.len()
                    );
                    for (name, value) in headers {
                        response.push_str(&format!("{name}: {value}\r\n"));
                    }
                    response.push_str("\r\n");
                    response.push_str(&body);
                    stream
                        .write_all(response.as_bytes())
                        .await
                        .expect("write response");
                    stream.shutdown().await.expect("close");
                }
                Reply::Stall => {
                    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                }
            }
        }
        captured
    });
    (base, handle)
}

async fn read_request(stream: &mut TcpStream) -> io::Result<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 16 * 1024];
    let head_end = loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buf.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let body = buf.split_off(head_end);
    let head = String::from_utf8_lossy(&buf).to_ascii_lowercase();
    let content_length = head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim() == "content-length" {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    });
    let chunked = head.contains("transfer-encoding: chunked");

    let mut body = body;
    loop {
        let done = match content_length {
            Some(len) => body.len() >= len,
            None if chunked => body.ends_with(b"0\r\n\r\n"),
            None => true,
        };
        if done {
            break;
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }
    Ok(Captured { head, body })
}
