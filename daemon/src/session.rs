//! Line-oriented session driver.
//!
//! Reads one command per line, applies it through the [`EngineHandle`], and
//! prints one result per line. A rejected command is reported and the
//! session continues — the engine guarantees rejected calls are no-ops.

use agora_engine::WorkflowStatus;
use agora_service::{EngineHandle, ServiceError};
use agora_types::{ProposalId, VoterAddress};
use serde::Serialize;
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Register { address: VoterAddress },
    StartProposals,
    EndProposals,
    StartVoting,
    EndVoting,
    Tally,
    Propose { caller: VoterAddress, description: String },
    Vote { caller: VoterAddress, proposal: ProposalId },
    Proposal { caller: VoterAddress, id: ProposalId },
    Winner,
    Status,
    Quit,
}

/// Parse one input line. Empty lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let keyword = parts.next().unwrap_or_default();
    let command = match keyword {
        "register" => SessionCommand::Register {
            address: VoterAddress::new(required(parts.next(), "register <address>")?),
        },
        "start-proposals" => SessionCommand::StartProposals,
        "end-proposals" => SessionCommand::EndProposals,
        "start-voting" => SessionCommand::StartVoting,
        "end-voting" => SessionCommand::EndVoting,
        "tally" => SessionCommand::Tally,
        "propose" => {
            let caller = required(parts.next(), "propose <address> <description>")?;
            let description = parts.collect::<Vec<_>>().join(" ");
            SessionCommand::Propose {
                caller: VoterAddress::new(caller),
                description,
            }
        }
        "vote" => SessionCommand::Vote {
            caller: VoterAddress::new(required(parts.next(), "vote <address> <proposal-id>")?),
            proposal: parse_id(parts.next(), "vote <address> <proposal-id>")?,
        },
        "proposal" => SessionCommand::Proposal {
            caller: VoterAddress::new(required(parts.next(), "proposal <address> <id>")?),
            id: parse_id(parts.next(), "proposal <address> <id>")?,
        },
        "winner" => SessionCommand::Winner,
        "status" => SessionCommand::Status,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

fn required<'a>(part: Option<&'a str>, usage: &str) -> Result<&'a str, String> {
    part.ok_or_else(|| format!("usage: {usage}"))
}

fn parse_id(part: Option<&str>, usage: &str) -> Result<ProposalId, String> {
    let raw = required(part, usage)?;
    raw.parse::<u64>()
        .map(ProposalId::new)
        .map_err(|_| format!("not a proposal id: {raw}"))
}

/// Successful outcome of one command, printable as text or JSON.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SessionReply {
    Registered { voter: VoterAddress },
    PhaseChanged { status: WorkflowStatus },
    Proposed { id: ProposalId },
    Voted { voter: VoterAddress, proposal: ProposalId },
    Tallied { winner: ProposalId },
    Proposal {
        id: ProposalId,
        description: String,
        vote_count: u32,
    },
    Winner { winner: Option<ProposalId> },
    Status { status: WorkflowStatus },
}

impl fmt::Display for SessionReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionReply::Registered { voter } => write!(f, "registered {voter}"),
            SessionReply::PhaseChanged { status } => write!(f, "phase is now {status}"),
            SessionReply::Proposed { id } => write!(f, "proposal {id} registered"),
            SessionReply::Voted { voter, proposal } => {
                write!(f, "{voter} voted for proposal {proposal}")
            }
            SessionReply::Tallied { winner } => write!(f, "winner is proposal {winner}"),
            SessionReply::Proposal {
                id,
                description,
                vote_count,
            } => write!(f, "proposal {id}: \"{description}\" ({vote_count} votes)"),
            SessionReply::Winner { winner: Some(id) } => write!(f, "winner is proposal {id}"),
            SessionReply::Winner { winner: None } => write!(f, "no winner yet (votes not tallied)"),
            SessionReply::Status { status } => write!(f, "phase is {status}"),
        }
    }
}

/// Apply one command; admin-gated commands run as `admin`.
pub async fn dispatch(
    handle: &EngineHandle,
    admin: &VoterAddress,
    command: SessionCommand,
) -> Result<SessionReply, ServiceError> {
    match command {
        SessionCommand::Register { address } => {
            handle
                .register_voter(admin.clone(), address.clone())
                .await?;
            Ok(SessionReply::Registered { voter: address })
        }
        SessionCommand::StartProposals => {
            handle.start_proposals_registration(admin.clone()).await?;
            Ok(SessionReply::PhaseChanged {
                status: handle.status().await?,
            })
        }
        SessionCommand::EndProposals => {
            handle.end_proposals_registration(admin.clone()).await?;
            Ok(SessionReply::PhaseChanged {
                status: handle.status().await?,
            })
        }
        SessionCommand::StartVoting => {
            handle.start_voting_session(admin.clone()).await?;
            Ok(SessionReply::PhaseChanged {
                status: handle.status().await?,
            })
        }
        SessionCommand::EndVoting => {
            handle.end_voting_session(admin.clone()).await?;
            Ok(SessionReply::PhaseChanged {
                status: handle.status().await?,
            })
        }
        SessionCommand::Tally => {
            let winner = handle.tally_votes(admin.clone()).await?;
            Ok(SessionReply::Tallied { winner })
        }
        SessionCommand::Propose {
            caller,
            description,
        } => {
            let id = handle.submit_proposal(caller, description).await?;
            Ok(SessionReply::Proposed { id })
        }
        SessionCommand::Vote { caller, proposal } => {
            handle.cast_vote(caller.clone(), proposal).await?;
            Ok(SessionReply::Voted {
                voter: caller,
                proposal,
            })
        }
        SessionCommand::Proposal { caller, id } => {
            let p = handle.proposal(caller, id).await?;
            Ok(SessionReply::Proposal {
                id,
                description: p.description,
                vote_count: p.vote_count,
            })
        }
        SessionCommand::Winner => Ok(SessionReply::Winner {
            winner: handle.winner().await?,
        }),
        SessionCommand::Status => Ok(SessionReply::Status {
            status: handle.status().await?,
        }),
        SessionCommand::Quit => unreachable!("quit is handled by the session loop"),
    }
}

/// Drive a whole session from a line-oriented reader until EOF or `quit`.
pub async fn run<R>(
    handle: EngineHandle,
    admin: VoterAddress,
    input: R,
    json: bool,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => command,
            Err(message) => {
                report_error(&message, json);
                continue;
            }
        };

        match dispatch(&handle, &admin, command).await {
            Ok(reply) if json => println!("{}", serde_json::to_string(&reply)?),
            Ok(reply) => println!("{reply}"),
            Err(error) => report_error(&error.to_string(), json),
        }
    }

    let stats = handle.stats();
    tracing::info!(
        accepted = stats.accepted,
        rejected = stats.rejected,
        "session finished"
    );
    Ok(())
}

fn report_error(message: &str, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "error": message }));
    } else {
        println!("error: {message}");
    }
}
