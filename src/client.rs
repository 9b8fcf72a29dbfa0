//! A minimal Redis client over a single connection.
//!
//! Framing is handled by `mini_redis::Connection`; this module only builds
//! requests and decodes replies into Rust types. Every call sends one
//! request and waits for its reply before returning.

use bytes::Bytes;
use mini_redis::{Connection, Frame};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::{debug, info, instrument};

use crate::cmd::Cmd;
use crate::{Config, Error, Result};

/// An open connection to the store.
///
/// The socket is owned by the client and closed when it is dropped.
pub struct Client {
    connection: Connection,
}

impl Client {
    /// Connects to `config.addr()` and authenticates when a password is set.
    #[instrument(skip(config), fields(addr = %config.addr(), auth = config.password.is_some()))]
    pub async fn connect(config: &Config) -> Result<Client> {
        let mut client = Client::connect_addr(config.addr()).await?;

        if let Some(password) = &config.password {
            client.auth(password).await?;
        }

        info!("connected");
        Ok(client)
    }

    /// Opens a connection without authenticating.
    pub async fn connect_addr<T: ToSocketAddrs>(addr: T) -> Result<Client> {
        let socket = TcpStream::connect(addr).await?;
        let connection = Connection::new(socket);

        Ok(Client { connection })
    }

    pub async fn auth(&mut self, password: &str) -> Result<()> {
        let cmd = Cmd::new("AUTH").arg(password);
        match self.request(cmd).await? {
            Frame::Simple(ref s) if s == "OK" => Ok(()),
            frame => Err(unexpected("AUTH", &frame)),
        }
    }

    /// Returns the server's reply to PING, normally `"PONG"`.
    pub async fn ping(&mut self) -> Result<String> {
        let frame = self.request(Cmd::new("PING")).await?;
        text("PING", frame)
    }

    /// Sets several fields of a hash at once. Returns the number of fields
    /// that were newly created.
    pub async fn hset_multiple<F, V>(&mut self, key: &str, fields: &[(F, V)]) -> Result<u64>
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cmd = Cmd::new("HSET").arg(key);
        for (field, value) in fields {
            cmd = cmd.arg(field.as_ref()).arg(value.as_ref());
        }
        let frame = self.request(cmd).await?;
        integer("HSET", frame)
    }

    pub async fn hset(&mut self, key: &str, field: &str, value: &str) -> Result<u64> {
        self.hset_multiple(key, &[(field, value)]).await
    }

    pub async fn hget(&mut self, key: &str, field: &str) -> Result<Option<String>> {
        let frame = self.request(Cmd::new("HGET").arg(key).arg(field)).await?;
        match frame {
            Frame::Null => Ok(None),
            frame => text("HGET", frame).map(Some),
        }
    }

    /// Returns all field/value pairs of a hash, in the order the server
    /// reports them. A missing key yields an empty vector.
    pub async fn hgetall(&mut self, key: &str) -> Result<Vec<(String, String)>> {
        let frame = self.request(Cmd::new("HGETALL").arg(key)).await?;
        pairs("HGETALL", frame)
    }

    /// Adds `member` with `score`, updating the score if it already exists.
    /// Returns the number of members added.
    pub async fn zadd(&mut self, key: &str, score: f64, member: &str) -> Result<u64> {
        let cmd = Cmd::new("ZADD").arg(key).arg(score).arg(member);
        let frame = self.request(cmd).await?;
        integer("ZADD", frame)
    }

    /// Members between `start` and `stop`, highest score first, with scores.
    pub async fn zrevrange_withscores(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(String, f64)>> {
        let cmd = Cmd::new("ZREVRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .arg("WITHSCORES");
        let frame = self.request(cmd).await?;

        pairs("ZREVRANGE", frame)?
            .into_iter()
            .map(|(member, score)| match score.parse::<f64>() {
                Ok(score) => Ok((member, score)),
                Err(_) => Err(Error::UnexpectedReply {
                    command: "ZREVRANGE".to_string(),
                    frame: format!("non-numeric score {score:?}"),
                }),
            })
            .collect()
    }

    /// Appends to the tail of a list. Returns the new length.
    pub async fn rpush(&mut self, key: &str, value: &str) -> Result<u64> {
        let frame = self.request(Cmd::new("RPUSH").arg(key).arg(value)).await?;
        integer("RPUSH", frame)
    }

    pub async fn lrange(&mut self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let cmd = Cmd::new("LRANGE").arg(key).arg(start).arg(stop);
        let frame = self.request(cmd).await?;
        strings("LRANGE", frame)
    }

    /// Removes all `keys` in one request. Returns how many existed.
    pub async fn del(&mut self, keys: &[&str]) -> Result<u64> {
        let cmd = keys.iter().fold(Cmd::new("DEL"), |cmd, key| cmd.arg(*key));
        let frame = self.request(cmd).await?;
        integer("DEL", frame)
    }

    pub async fn exists(&mut self, key: &str) -> Result<bool> {
        let frame = self.request(Cmd::new("EXISTS").arg(key)).await?;
        integer("EXISTS", frame).map(|n| n > 0)
    }

    async fn request(&mut self, cmd: Cmd) -> Result<Frame> {
        debug!(command = cmd.name(), "sending request");
        let name = cmd.name();
        self.connection.write_frame(&cmd.into_frame()).await?;

        match self.connection.read_frame().await? {
            Some(Frame::Error(msg)) => {
                debug!(command = name, error = %msg, "server returned error");
                Err(Error::Server(msg))
            }
            Some(frame) => Ok(frame),
            None => Err(Error::ConnectionReset),
        }
    }
}

fn unexpected(command: &str, frame: &Frame) -> Error {
    Error::UnexpectedReply {
        command: command.to_string(),
        frame: frame.to_string(),
    }
}

fn utf8(command: &str, data: Bytes) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|_| Error::UnexpectedReply {
        command: command.to_string(),
        frame: "reply is not valid UTF-8".to_string(),
    })
}

fn text(command: &str, frame: Frame) -> Result<String> {
    match frame {
        Frame::Simple(s) => Ok(s),
        Frame::Bulk(data) => utf8(command, data),
        frame => Err(unexpected(command, &frame)),
    }
}

fn integer(command: &str, frame: Frame) -> Result<u64> {
    match frame {
        Frame::Integer(n) => Ok(n),
        frame => Err(unexpected(command, &frame)),
    }
}

fn strings(command: &str, frame: Frame) -> Result<Vec<String>> {
    match frame {
        Frame::Array(items) => items.into_iter().map(|item| text(command, item)).collect(),
        frame => Err(unexpected(command, &frame)),
    }
}

/// Decodes a flat `[k1, v1, k2, v2, ...]` reply.
fn pairs(command: &str, frame: Frame) -> Result<Vec<(String, String)>> {
    let items = strings(command, frame)?;
    if items.len() % 2 != 0 {
        return Err(Error::UnexpectedReply {
            command: command.to_string(),
            frame: format!("odd number of elements ({})", items.len()),
        });
    }

    let mut iter = items.into_iter();
    let mut out = Vec::new();
    while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
        out.push((k, v));
    }
    Ok(out)
}
