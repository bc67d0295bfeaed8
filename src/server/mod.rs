//! Minimal HTTP front end over the lookup core. Catalogs are loaded once
//! before the listener starts accepting; a load failure aborts startup.

use std::fmt;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use tracing::{error, info};

use crate::data::catalog::DataError;
use crate::data::registry::GameData;

pub mod api;
pub mod routes;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const BIND_ENV: &str = "ADJUTANT_BIND";

/// Bind address from ADJUTANT_BIND, falling back to localhost:3000.
pub fn bind_addr() -> String {
    std::env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string())
}

#[derive(Debug)]
pub enum ServerError {
    Data(DataError),
    Io(std::io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ServerError {}

pub fn run_server(bind_addr: &str) -> Result<(), ServerError> {
    let data = GameData::load().map_err(ServerError::Data)?;
    let listener = TcpListener::bind(bind_addr).map_err(ServerError::Io)?;
    info!(addr = bind_addr, "listening");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&data, &mut stream) {
                    error!(error = %err, "request failed");
                }
            }
            Err(err) => error!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(data: &GameData, stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(data, method, path).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
