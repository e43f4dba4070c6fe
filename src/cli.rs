//! Interface de linha de comando do painel baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (list, summary,
//! score-all, move, invite, book, reject, sync, reply, upload) e flags
//! globais (--base-url, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::pipeline::ApplicantStatus;

/// Painel do pipeline de recrutamento: acompanha candidatos, envia convites
/// e coordena respostas simuladas.
#[derive(Debug, Parser)]
#[command(name = "pipeline-desk", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL base do serviço remoto (sobrepõe arquivo e `HR_APP_URL`).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Estágio aceito pela CLI, mapeado para [`ApplicantStatus`] internamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    New,
    Reviewing,
    Shortlisted,
    AwaitingReply,
    Booked,
    Hired,
    Rejected,
}

impl From<StatusArg> for ApplicantStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::New => ApplicantStatus::New,
            StatusArg::Reviewing => ApplicantStatus::Reviewing,
            StatusArg::Shortlisted => ApplicantStatus::Shortlisted,
            StatusArg::AwaitingReply => ApplicantStatus::AwaitingReply,
            StatusArg::Booked => ApplicantStatus::Booked,
            StatusArg::Hired => ApplicantStatus::Hired,
            StatusArg::Rejected => ApplicantStatus::Rejected,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista candidatos, opcionalmente filtrados por estágio e nota mínima.
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Nota mínima do currículo (candidatos sem nota contam como 0).
        #[arg(long, default_value_t = 0)]
        min_score: u32,
    },

    /// Mostra o resumo do pipeline por estágio.
    Summary,

    /// Executa a pontuação de todos os candidatos.
    ScoreAll,

    /// Move um candidato para outro estágio.
    Move {
        id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Pré-visualiza e envia convites de entrevista.
    Invite {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Envia sem pedir confirmação após a pré-visualização.
        #[arg(long, short, default_value_t = false)]
        yes: bool,

        /// Em modo mock, aguarda as respostas simuladas antes de sair.
        #[arg(long, default_value_t = false)]
        wait: bool,
    },

    /// Agenda entrevistas para os candidatos informados.
    Book {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Rejeita os candidatos informados.
    Reject {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Ressincroniza com o sistema de RH (zera todas as notas).
    Sync,

    /// Gera um rascunho de resposta a uma mensagem do candidato.
    Reply { id: String, message: String },

    /// Adiciona um currículo manualmente e o pontua.
    Upload {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Distância até o local de trabalho, em milhas.
        #[arg(long)]
        distance: Option<f64>,
        /// Arquivo de texto com o conteúdo do currículo.
        #[arg(long)]
        resume_file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_invite_subcommand() {
        let cli = Cli::parse_from(["pipeline-desk", "invite", "PAY-0001", "PAY-0002", "--yes"]);
        match cli.command {
            Command::Invite { ids, yes, wait } => {
                assert_eq!(ids, vec!["PAY-0001", "PAY-0002"]);
                assert!(yes);
                assert!(!wait);
            }
            _ => panic!("expected Invite command"),
        }
    }

    #[test]
    fn cli_parses_move_with_snake_case_status() {
        let cli = Cli::parse_from(["pipeline-desk", "move", "PAY-0003", "awaiting-reply"]);
        match cli.command {
            Command::Move { id, status } => {
                assert_eq!(id, "PAY-0003");
                assert_eq!(ApplicantStatus::from(status), ApplicantStatus::AwaitingReply);
            }
            _ => panic!("expected Move command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "pipeline-desk",
            "--base-url",
            "http://hr.local",
            "--verbose",
            "list",
            "--status",
            "reviewing",
            "--min-score",
            "55",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://hr.local"));
        match cli.command {
            Command::List { status, min_score } => {
                assert_eq!(status, Some(StatusArg::Reviewing));
                assert_eq!(min_score, 55);
            }
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn cli_rejects_empty_bulk() {
        assert!(Cli::try_parse_from(["pipeline-desk", "reject"]).is_err());
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
