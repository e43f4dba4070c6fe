//! Configuração do painel carregada a partir de `pipeline-desk.toml`.
//!
//! A struct [`DeskConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `HR_APP_URL` tem precedência sobre o arquivo.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::scheduler::ScheduleConfig;

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "pipeline-desk.toml";

/// Configuração de nível superior carregada de `pipeline-desk.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeskConfig {
    /// URL base do serviço remoto (sem o sufixo `/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tempo máximo para estabelecer a conexão HTTP, em segundos.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Atraso, em milissegundos, antes da primeira resposta simulada.
    #[serde(default = "default_response_base_delay_ms")]
    pub response_base_delay_ms: u64,

    /// Incremento por candidato dentro de um lote, em milissegundos.
    #[serde(default = "default_response_stagger_ms")]
    pub response_stagger_ms: u64,

    /// Filtro de log padrão quando `RUST_LOG` não está definido.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Valor padrão para a URL base: servidor local de desenvolvimento.
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

// Valor padrão para o timeout de conexão: 10s.
fn default_connect_timeout_secs() -> u64 {
    10
}

// Valor padrão para o atraso base: 5000ms.
fn default_response_base_delay_ms() -> u64 {
    5000
}

// Valor padrão para o escalonamento: 800ms.
fn default_response_stagger_ms() -> u64 {
    800
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            response_base_delay_ms: default_response_base_delay_ms(),
            response_stagger_ms: default_response_stagger_ms(),
            log_level: default_log_level(),
        }
    }
}

impl DeskConfig {
    /// Carrega a configuração de `pipeline-desk.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(Path::new(CONFIG_FILE))?;
        config.apply_env_override(std::env::var("HR_APP_URL").ok());
        Ok(config)
    }

    /// Carrega de um caminho explícito, sem aplicar variáveis de ambiente.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<DeskConfig>(&contents)?)
    }

    // Variável de ambiente tem precedência sobre o arquivo para a URL base.
    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Política de atrasos do agendador de respostas simuladas.
    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            base_delay: Duration::from_millis(self.response_base_delay_ms),
            stagger: Duration::from_millis(self.response_stagger_ms),
        }
    }
}
