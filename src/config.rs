use crate::error::{PicoError, Result};
use pico_commerce_common::{ColumnLayout, ShippingPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MENU_GID: &str = "202191104";
pub const DEFAULT_ORDER_HISTORY_GID: &str = "1771639339";

const APPS_SCRIPT_URL_ENV: &str = "PICO_APPS_SCRIPT_URL";
const KAKAO_API_KEY_ENV: &str = "PICO_KAKAO_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spreadsheet_id: Option<String>,
    pub menu_sheet_gid: String,
    pub order_history_gid: String,
    pub individual_order_gid: String,
    pub apps_script_url: Option<String>,
    pub kakao_api_key: Option<String>,
    pub layout: ColumnLayout,
    pub shipping_policy: ShippingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            menu_sheet_gid: DEFAULT_MENU_GID.into(),
            order_history_gid: DEFAULT_ORDER_HISTORY_GID.into(),
            individual_order_gid: "0".into(),
            apps_script_url: None,
            kakao_api_key: None,
            layout: ColumnLayout::default(),
            shipping_policy: ShippingPolicy::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        tracing::debug!("설정 저장: {}", config_path.display());
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PicoError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("pico-commerce").join("config.json"))
    }

    pub fn get_spreadsheet_id(&self) -> Result<String> {
        self.spreadsheet_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or(PicoError::MissingSetting("스프레드시트 ID", "set-spreadsheet-id"))
    }

    pub fn get_apps_script_url(&self) -> Result<String> {
        // 환경변수 우선
        if let Ok(url) = std::env::var(APPS_SCRIPT_URL_ENV) {
            return Ok(url);
        }

        self.apps_script_url
            .clone()
            .ok_or(PicoError::MissingSetting("Apps Script URL", "set-apps-script-url"))
    }

    pub fn get_kakao_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(KAKAO_API_KEY_ENV) {
            return Ok(key);
        }

        self.kakao_api_key
            .clone()
            .ok_or(PicoError::MissingSetting("카카오 API 키", "set-kakao-api-key"))
    }
}
