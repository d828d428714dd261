//! In-process FTP server for integration tests
//!
//! Speaks just enough of RFC 959 for an upload session: USER, PASS, TYPE,
//! PASV, STOR and QUIT. Stored files are kept in memory.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

pub const READY: u16 = 220;
pub const OK: u16 = 200;
pub const PASSIVE_MODE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const OPENING_DATA: u16 = 150;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const GOODBYE: u16 = 221;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const CANT_OPEN_DATA: u16 = 425;
pub const NOT_IMPLEMENTED: u16 = 502;
pub const AUTH_FAILED: u16 = 530;

fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

#[derive(Debug, PartialEq)]
enum Command {
    User(String),
    Pass(String),
    Type(String),
    Pasv,
    Stor(String),
    Quit,
    Unknown(String),
}

fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "USER" if !arg.is_empty() => Command::User(arg.to_string()),
        "PASS" => Command::Pass(arg.to_string()),
        "TYPE" if !arg.is_empty() => Command::Type(arg.to_string()),
        "PASV" => Command::Pasv,
        "STOR" if !arg.is_empty() => Command::Stor(arg.to_string()),
        "QUIT" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[derive(Default)]
struct Recorded {
    commands: Vec<String>,
    files: HashMap<String, Vec<u8>>,
    sessions: usize,
}

/// What the server does with the data connection of a STOR
#[derive(Clone, Copy, PartialEq)]
enum DataHandling {
    Store,
    /// Accept the connection, then never read from it
    Stall,
}

pub struct TestFtpServer {
    addr: SocketAddr,
    recorded: Arc<Mutex<Recorded>>,
}

impl TestFtpServer {
    /// Starts a server accepting exactly one username/password pair
    pub async fn start(username: &str, password: &str) -> Self {
        Self::spawn(username, password, DataHandling::Store).await
    }

    /// Like `start`, but uploads hang once the data connection is open
    pub async fn start_stalling(username: &str, password: &str) -> Self {
        Self::spawn(username, password, DataHandling::Stall).await
    }

    async fn spawn(username: &str, password: &str, data_handling: DataHandling) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let credentials = Arc::new((username.to_string(), password.to_string()));

        let registry = Arc::clone(&recorded);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&registry);
                let credentials = Arc::clone(&credentials);
                tokio::spawn(async move {
                    let _ = handle_session(stream, &credentials, data_handling, recorded).await;
                });
            }
        });

        Self { addr, recorded }
    }

    /// `host:port` of the control connection
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub fn stored_file(&self, path: &str) -> Option<Vec<u8>> {
        self.recorded.lock().unwrap().files.get(path).cloned()
    }

    pub fn commands(&self) -> Vec<String> {
        self.recorded.lock().unwrap().commands.clone()
    }

    pub fn session_count(&self) -> usize {
        self.recorded.lock().unwrap().sessions
    }
}

async fn handle_session(
    stream: TcpStream,
    credentials: &(String, String),
    data_handling: DataHandling,
    recorded: Arc<Mutex<Recorded>>,
) -> std::io::Result<()> {
    recorded.lock().unwrap().sessions += 1;

    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    write_half
        .write_all(format_response(READY, "Welcome to RAX FTP Server").as_bytes())
        .await?;

    let mut username: Option<String> = None;
    let mut logged_in = false;
    let mut passive: Option<TcpListener> = None;

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }

        let raw = line.trim_end_matches(['\r', '\n']);
        let command = parse_command(raw);
        let logged = match &command {
            Command::Pass(_) => "PASS ****".to_string(),
            _ => raw.to_string(),
        };
        recorded.lock().unwrap().commands.push(logged);

        let reply = match command {
            Command::User(name) => {
                username = Some(name);
                logged_in = false;
                format_response(PASSWORD_REQUIRED, "Password required")
            }
            Command::Pass(pass) => {
                let (expected_user, expected_pass) = credentials;
                if username.as_deref() == Some(expected_user.as_str()) && &pass == expected_pass {
                    logged_in = true;
                    format_response(LOGIN_SUCCESS, "Login successful")
                } else {
                    format_response(AUTH_FAILED, "Login incorrect")
                }
            }
            Command::Quit => {
                write_half
                    .write_all(format_response(GOODBYE, "Goodbye").as_bytes())
                    .await?;
                return Ok(());
            }
            _ if !logged_in => format_response(AUTH_FAILED, "Not logged in"),
            Command::Type(_) => format_response(OK, "Type set"),
            Command::Pasv => {
                let listener = TcpListener::bind("127.0.0.1:0").await?;
                let port = listener.local_addr()?.port();
                passive = Some(listener);
                format_response(
                    PASSIVE_MODE,
                    &format!(
                        "Entering Passive Mode (127,0,0,1,{},{})",
                        port >> 8,
                        port & 0xff
                    ),
                )
            }
            Command::Stor(path) => match passive.take() {
                Some(listener) => {
                    write_half
                        .write_all(
                            format_response(OPENING_DATA, "Opening data connection").as_bytes(),
                        )
                        .await?;

                    let (mut data_stream, _) = listener.accept().await?;
                    if data_handling == DataHandling::Stall {
                        // Holds both connections open without reading either
                        std::future::pending::<()>().await;
                    }
                    let mut contents = Vec::new();
                    data_stream.read_to_end(&mut contents).await?;
                    recorded.lock().unwrap().files.insert(path, contents);

                    format_response(TRANSFER_COMPLETE, "Transfer complete")
                }
                None => format_response(CANT_OPEN_DATA, "Use PASV first"),
            },
            Command::Unknown(_) => format_response(NOT_IMPLEMENTED, "Command not implemented"),
        };

        write_half.write_all(reply.as_bytes()).await?;
    }
}

#[test]
fn test_parse_upload_commands() {
    assert_eq!(parse_command("USER alice"), Command::User("alice".into()));
    assert_eq!(parse_command("PASS "), Command::Pass("".into()));
    assert_eq!(parse_command("type I"), Command::Type("I".into()));
    assert_eq!(parse_command("PASV"), Command::Pasv);
    assert_eq!(
        parse_command("STOR uploads/1-a.png"),
        Command::Stor("uploads/1-a.png".into())
    );
    assert_eq!(parse_command("QUIT"), Command::Quit);
    assert_eq!(parse_command("LIST"), Command::Unknown("LIST".into()));
}
