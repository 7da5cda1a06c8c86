//! Network listener: line-delimited JSON over TCP.
//!
//! Each connection thread decodes intents and queues them to the single
//! engine worker; the worker translates one intent at a time, which
//! serializes every state read-modify-write, and optionally forwards the
//! resulting CC to a MIDI output. Replies mirror requests line for line.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use serde::Serialize;

use crate::bridge::TranslationEngine;
use crate::bridge::error::BridgeError;
use crate::midi::MidiSender;
use crate::types::intent::Intent;
use crate::types::message::BridgeMessage;

/// One queued translation request with its reply channel
pub struct Job {
    intent: Intent,
    reply: Sender<Result<BridgeMessage, BridgeError>>,
}

/// Wire shape for failed translations
#[derive(Debug, Serialize)]
struct ErrorReply {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<Vec<String>>,
}

impl ErrorReply {
    fn from_bridge_error(err: &BridgeError) -> Self {
        let available = match err {
            BridgeError::MappingNotFound { available, .. } => Some(available.clone()),
            _ => None,
        };
        Self {
            error: err.kind(),
            message: err.to_string(),
            available,
        }
    }

    fn bad_request(message: String) -> Self {
        Self {
            error: "bad_request",
            message,
            available: None,
        }
    }
}

/// Engine worker: drains the job queue until every sender is gone.
/// Delivery failures are logged and never fail the translation reply.
pub fn run_engine_worker(
    engine: TranslationEngine,
    jobs: Receiver<Job>,
    mut midi: Option<MidiSender>,
) {
    for job in jobs.iter() {
        let result = engine.translate(&job.intent);

        if let (Ok(message), Some(sender)) = (&result, midi.as_mut()) {
            for emission in &message.payload {
                if let Err(err) = sender.send(emission) {
                    warn!("MIDI delivery failed: {err:#}");
                }
            }
        }

        // A client that hung up before its reply is not an error
        let _ = job.reply.send(result);
    }
}

/// Accept connections forever, one handler thread per client
pub fn serve(listener: TcpListener, jobs: Sender<Job>) -> Result<()> {
    let addr = listener.local_addr().context("Failed to read local address")?;
    info!("listening on {addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let jobs = jobs.clone();
                thread::spawn(move || {
                    if let Err(err) = handle_client(stream, jobs) {
                        debug!("client handler ended: {err:#}");
                    }
                });
            }
            Err(err) => warn!("failed to accept connection: {err}"),
        }
    }

    Ok(())
}

fn handle_client(stream: TcpStream, jobs: Sender<Job>) -> Result<()> {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    info!("client connected: {peer}");

    let reader = BufReader::new(stream.try_clone().context("Failed to clone stream")?);
    let mut writer = BufWriter::new(stream);

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Intent>(&line) {
            Ok(intent) => {
                let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
                jobs.send(Job {
                    intent,
                    reply: reply_tx,
                })
                .context("Engine worker is gone")?;

                match reply_rx.recv().context("Engine worker dropped the reply")? {
                    Ok(message) => serde_json::to_string(&message)?,
                    Err(err) => serde_json::to_string(&ErrorReply::from_bridge_error(&err))?,
                }
            }
            // Undecodable lines get an error reply; the connection stays open
            Err(err) => serde_json::to_string(&ErrorReply::bad_request(format!(
                "invalid intent JSON: {err}"
            )))?,
        };

        writer.write_all(reply.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    info!("client disconnected: {peer}");
    Ok(())
}
