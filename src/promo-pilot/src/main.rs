//! PromoPilot — terminal client for the AI promotional campaign assistant.
//!
//! Drives the campaign lifecycle (show, select, refine, performance, RAG
//! archive, delete) and the conversational campaign intake against a running
//! backend.

use std::io::{BufRead, Write as _};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use promo_api_client::{CampaignListFilter, HttpBackend, PromoBackend};
use promo_chat::{ChatSession, SessionState, TurnOutcome};
use promo_core::types::{CampaignStatus, ChatRole, PerformanceStatus};
use promo_core::AppConfig;
use promo_lifecycle::tips::TipRotator;
use promo_lifecycle::CampaignOrchestrator;
use promo_listing::{CampaignFetcher, ListCache, SessionFetcher};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "promo-pilot")]
#[command(about = "AI promotional campaign assistant client")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, env = "PROMO_PILOT__API__BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect and act on one campaign
    Campaign {
        #[command(subcommand)]
        action: CampaignCommand,
    },
    /// Conversational campaign intake
    Chat {
        /// Resume an existing session instead of starting fresh
        #[arg(long)]
        session: Option<String>,
    },
    /// List chat sessions
    Sessions,
    /// List campaigns
    Campaigns {
        #[arg(long)]
        search: Option<String>,
        /// Status filter, e.g. COMPLETED
        #[arg(long)]
        status: Option<String>,
    },
    /// Monthly summary and recent activity
    Dashboard,
}

#[derive(Subcommand, Debug)]
enum CampaignCommand {
    /// Show the grouped campaign detail
    Show { id: String },
    /// Toggle the given message drafts and save the selection
    Select {
        id: String,
        result_ids: Vec<String>,
    },
    /// Request a rework of the generated drafts
    Refine { id: String, feedback: String },
    /// Register or update performance figures
    Performance {
        id: String,
        ctr: f64,
        conversion_rate: f64,
        /// SUCCESS, FAILURE, or UNDECIDED; omitted from the request if absent
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Archive the outcome into the RAG knowledge base
    Rag {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Delete the campaign (irreversible)
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

fn parse_performance_status(raw: &str) -> anyhow::Result<PerformanceStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_uppercase()))
        .with_context(|| format!("unknown performance status: {raw}"))
}

fn parse_campaign_status(raw: &str) -> anyhow::Result<CampaignStatus> {
    serde_json::from_value(serde_json::Value::String(raw.to_uppercase()))
        .with_context(|| format!("unknown campaign status: {raw}"))
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y"))
}

fn print_campaign(orch: &CampaignOrchestrator) {
    let Some(campaign) = orch.campaign() else {
        return;
    };

    println!("{} ({})", campaign.purpose, campaign.campaign_id);
    println!("상태: {}", campaign.status.display_name());
    if let Some(performance) = campaign.performance_status {
        println!("성공여부: {}", performance.display_name());
    }
    match campaign.actual_ctr {
        Some(ctr) => println!("CTR: {ctr}%"),
        None => println!("CTR: N/A"),
    }
    match campaign.conversion_rate {
        Some(rate) => println!("전환율: {rate}%"),
        None => println!("전환율: N/A"),
    }

    if campaign.status.is_generating() {
        let tips = TipRotator::new();
        println!("\n메시지 생성 중... {}", tips.random_tip());
        return;
    }

    for group in &campaign.target_groups {
        println!("\n[{}] {}", group.target_group_index, group.target_name);
        println!("  {}", group.target_features);
        println!("  분류 근거: {}", group.classification_reason);
        for draft in &group.message_results {
            let marker = if draft.is_selected { "*" } else { " " };
            println!(
                "  {marker} 시안 {} ({}): {}",
                draft.message_draft_index, draft.result_id, draft.message_text
            );
            let report = &draft.validator_report;
            println!(
                "      스팸 위험도 {:.0}/100, 정책 {:?}: {}",
                report.spam_risk_score, report.policy_compliance, report.review_summary
            );
        }
    }
}

async fn run_campaign(
    backend: Arc<dyn PromoBackend>,
    action: CampaignCommand,
) -> anyhow::Result<()> {
    match action {
        CampaignCommand::Show { id } => {
            let mut orch = CampaignOrchestrator::new(backend, id);
            orch.load().await?;
            print_campaign(&orch);
        }
        CampaignCommand::Select { id, result_ids } => {
            let mut orch = CampaignOrchestrator::new(backend, id);
            orch.load().await?;
            for result_id in &result_ids {
                if !orch.toggle_selection(result_id)? {
                    bail!("no message draft with id {result_id}");
                }
            }
            if !orch.selection_changed() {
                println!("선택 내용에 변경이 없습니다.");
                return Ok(());
            }
            orch.commit_selection().await?;
            println!("메시지 선택이 저장되었습니다.");
            print_campaign(&orch);
        }
        CampaignCommand::Refine { id, feedback } => {
            let mut orch = CampaignOrchestrator::new(backend, id);
            orch.load().await?;
            orch.submit_refinement(&feedback).await?;
            println!("수정 요청이 성공적으로 전송되었습니다.");
        }
        CampaignCommand::Performance {
            id,
            ctr,
            conversion_rate,
            status,
            notes,
        } => {
            let status = status
                .as_deref()
                .map(parse_performance_status)
                .transpose()?;
            let mut orch = CampaignOrchestrator::new(backend, id);
            orch.load().await?;
            orch.submit_performance(ctr, conversion_rate, status, &notes)
                .await?;
            println!("성과가 성공적으로 저장되었습니다.");
        }
        CampaignCommand::Rag { id, yes } => {
            let mut orch = CampaignOrchestrator::new(backend, id);
            orch.load().await?;
            if !yes && !confirm(orch.rag_prompt()?)? {
                return Ok(());
            }
            orch.trigger_rag().await?;
            println!("RAG DB에 성공적으로 반영되었습니다.");
        }
        CampaignCommand::Delete { id, yes } => {
            let mut orch = CampaignOrchestrator::new(backend, id);
            orch.load().await?;
            if !yes && !confirm(&orch.delete_prompt()?)? {
                return Ok(());
            }
            orch.delete().await?;
            println!("캠페인이 삭제되었습니다.");
        }
    }
    Ok(())
}

/// Print the assistant reply as it is revealed, then return once committed.
async fn follow_reveal(session: &ChatSession) {
    let mut printed = 0;
    loop {
        let buffer = session.reveal_buffer();
        let fresh: String = buffer.chars().skip(printed).collect();
        if !fresh.is_empty() {
            print!("{fresh}");
            let _ = std::io::stdout().flush();
            printed += fresh.chars().count();
        }
        if session.state() != SessionState::Revealing {
            println!();
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

async fn run_chat(
    backend: Arc<dyn PromoBackend>,
    config: &AppConfig,
    resume: Option<String>,
) -> anyhow::Result<()> {
    let mut session = ChatSession::new(
        backend,
        Duration::from_millis(config.chat.reveal_interval_ms),
    );

    if let Some(conversation_id) = resume {
        session.load_history(&conversation_id).await?;
        for turn in session.transcript() {
            let who = match turn.role {
                ChatRole::User => "나",
                ChatRole::Assistant => "AI",
            };
            println!("{who}: {}", turn.content);
        }
    }

    let stdin = std::io::stdin();
    loop {
        print!("나: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.submit(&line).await {
            Ok(TurnOutcome::NewSession(conversation_id)) => {
                info!(%conversation_id, "New chat session");
                if let Some(turn) = session.transcript().last() {
                    println!("AI: {}", turn.content);
                }
            }
            Ok(TurnOutcome::Revealing) => {
                print!("AI: ");
                std::io::stdout().flush()?;
                follow_reveal(&session).await;
            }
            Ok(TurnOutcome::HandedOff(seed)) => {
                if let Some(turn) = session.transcript().last() {
                    println!("AI: {}", turn.content);
                }
                match seed {
                    Some(seed) => println!(
                        "캠페인 초안이 준비되었습니다: {} — {}",
                        seed.purpose, seed.core_benefit_text
                    ),
                    None => println!("대화가 종료되었습니다."),
                }
                return Ok(());
            }
            Err(e) => {
                if let Some(turn) = session.transcript().last() {
                    println!("AI: {}", turn.content);
                }
                tracing::warn!(error = %e, "Chat turn failed");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promo_pilot=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let backend: Arc<dyn PromoBackend> = Arc::new(HttpBackend::new(&config.api)?);

    match cli.command {
        Command::Campaign { action } => run_campaign(backend, action).await?,
        Command::Chat { session } => run_chat(backend, &config, session).await?,
        Command::Sessions => {
            let cache = ListCache::with_cap(
                SessionFetcher::new(backend, config.chat.history_page_size),
                config.lists.item_cap,
            );
            cache.load_page(0).await?;
            for session in cache.items() {
                println!(
                    "{}  {}  ({})",
                    session.conversation_id,
                    session.title,
                    session.last_updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Command::Campaigns { search, status } => {
            let filter = CampaignListFilter {
                search,
                status: status.as_deref().map(parse_campaign_status).transpose()?,
            };
            let cache = ListCache::with_cap(
                CampaignFetcher::new(backend, config.lists.page_size, filter),
                config.lists.item_cap,
            );
            cache.load_page(0).await?;
            for campaign in cache.items() {
                println!(
                    "{}  [{}]  {}",
                    campaign.campaign_id,
                    campaign.status.display_name(),
                    campaign.purpose
                );
            }
        }
        Command::Dashboard => {
            let summary = backend.dashboard_summary().await?;
            println!("최근 프로모션 현황");
            for month in summary {
                println!(
                    "  {}: 진행중 {}, 완료 {}",
                    month.month, month.ongoing_count, month.completed_count
                );
            }
            println!("최근 프로모션");
            for activity in backend.recent_activity().await? {
                println!(
                    "  {}  [{}]  {}",
                    activity.updated_at.format("%Y-%m-%d"),
                    activity.status.display_name(),
                    activity.purpose
                );
            }
        }
    }

    Ok(())
}
