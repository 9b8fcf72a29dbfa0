//! The demo session: a fixed create/read/update/delete walk over a hash, a
//! sorted set and a list.

use std::fmt;
use std::io::Write;

use tracing::info;

use crate::{Client, Result};

pub const USER_KEY: &str = "help:user:demo";
pub const QUEUE_KEY: &str = "help:queue:priority";
pub const LOG_KEY: &str = "help:ticket:demo:log";

pub const KEYS: [&str; 3] = [USER_KEY, QUEUE_KEY, LOG_KEY];

pub const USER_NAME: &str = "Ali Demo";
pub const USER_EMAIL: &str = "demo@example.com";
pub const UPDATED_NAME: &str = "Ali Updated";

pub const TICKET: &str = "ticket:demo";
pub const TICKET_PRIORITY: f64 = 10.0;

pub const CREATED_ENTRY: &str = "Ticket created by Ali Demo";
pub const UPDATED_ENTRY: &str = "Name updated to Ali Updated";

/// Everything the session read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub ping: String,
    pub user: Vec<(String, String)>,
    pub queue: Vec<(String, f64)>,
    pub log: Vec<String>,
    pub updated_name: Option<String>,
    pub deleted: u64,
    /// Keys that still existed after the final delete.
    pub remaining: Vec<String>,
}

pub struct Session<'a, W> {
    client: &'a mut Client,
    out: W,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(client: &'a mut Client, out: W) -> Session<'a, W> {
        Session { client, out }
    }

    /// Runs every step in order. The first failure ends the session; writes
    /// that already happened are left in place.
    pub async fn run(mut self) -> Result<Report> {
        let ping = self.client.ping().await?;
        writeln!(self.out, "Connected: {ping}")?;

        self.create().await?;
        writeln!(self.out, "Created sample keys")?;

        let user = self.client.hgetall(USER_KEY).await?;
        writeln!(self.out, "User hash -> {}", Fields(&user))?;
        let queue = self.client.zrevrange_withscores(QUEUE_KEY, 0, -1).await?;
        writeln!(self.out, "Queue -> {}", Scores(&queue))?;
        let log = self.client.lrange(LOG_KEY, 0, -1).await?;
        writeln!(self.out, "Logs -> {log:?}")?;

        self.client.hset(USER_KEY, "name", UPDATED_NAME).await?;
        self.client.rpush(LOG_KEY, UPDATED_ENTRY).await?;
        let updated_name = self.client.hget(USER_KEY, "name").await?;
        writeln!(
            self.out,
            "Updated user name -> {}",
            updated_name.as_deref().unwrap_or("(nil)")
        )?;

        let deleted = self.client.del(&KEYS).await?;
        writeln!(self.out, "Deleted sample keys ({deleted} removed)")?;

        let mut remaining = Vec::new();
        for key in KEYS {
            if self.client.exists(key).await? {
                remaining.push(key.to_string());
            }
        }
        if remaining.is_empty() {
            writeln!(self.out, "Verified: no sample keys remain")?;
        } else {
            writeln!(self.out, "Still present: {remaining:?}")?;
        }

        writeln!(self.out, "Done")?;
        info!(deleted, "session finished");

        Ok(Report {
            ping,
            user,
            queue,
            log,
            updated_name,
            deleted,
            remaining,
        })
    }

    async fn create(&mut self) -> Result<()> {
        self.client
            .hset_multiple(USER_KEY, &[("name", USER_NAME), ("email", USER_EMAIL)])
            .await?;
        self.client.zadd(QUEUE_KEY, TICKET_PRIORITY, TICKET).await?;
        self.client.rpush(LOG_KEY, CREATED_ENTRY).await?;
        Ok(())
    }
}

struct Fields<'a>(&'a [(String, String)]);

impl fmt::Display for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

struct Scores<'a>(&'a [(String, f64)]);

impl fmt::Display for Scores<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
