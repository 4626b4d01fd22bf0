//! リンカーの調整パラメータ

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// パラメータ検証エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("link_cost must be positive")]
    ZeroLinkCost,

    #[error("turns_mult must be positive")]
    ZeroTurnsMult,

    #[error("store_shards must be positive")]
    ZeroShards,

    #[error("static_share must be within [0, 1], got {0}")]
    StaticShare(f64),
}

/// リンカーの調整パラメータ
///
/// デフォルト値は対局ループで使っている値と一致させている。
/// TOML などから読む場合、省略した項目はデフォルト値になる。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerParams {
    /// 1回の展開で消費するティック
    pub link_cost: u64,
    /// 子へ配分を始める枝1本あたりのティック
    pub turns_mult: u64,
    /// `tick_processed` がこれを超えた Linked ノードは再帰評価する
    pub tick_threshold: u64,
    /// 静的評価値を重みへ写すときの中心
    pub eval_center: i32,
    /// 深いノードの重みに混ぜる静的重みの割合
    pub static_share: f64,
    /// `RamStore` のシャード数（2 の冪に切り上げ）
    pub store_shards: usize,
}

impl Default for LinkerParams {
    fn default() -> Self {
        Self {
            link_cost: 100,
            turns_mult: 10,
            tick_threshold: 5000,
            eval_center: 5000,
            static_share: 0.1,
            store_shards: 16,
        }
    }
}

impl LinkerParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.link_cost == 0 {
            return Err(ParamsError::ZeroLinkCost);
        }
        if self.turns_mult == 0 {
            return Err(ParamsError::ZeroTurnsMult);
        }
        if self.store_shards == 0 {
            return Err(ParamsError::ZeroShards);
        }
        if !self.static_share.is_finite() || !(0.0..=1.0).contains(&self.static_share) {
            return Err(ParamsError::StaticShare(self.static_share));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(LinkerParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = LinkerParams::default();
        let cases = [
            (LinkerParams { link_cost: 0, ..base }, ParamsError::ZeroLinkCost),
            (LinkerParams { turns_mult: 0, ..base }, ParamsError::ZeroTurnsMult),
            (LinkerParams { store_shards: 0, ..base }, ParamsError::ZeroShards),
            (LinkerParams { static_share: 1.5, ..base }, ParamsError::StaticShare(1.5)),
        ];
        for (params, expected) in cases {
            assert_eq!(params.validate(), Err(expected));
        }
        let nan = LinkerParams { static_share: f64::NAN, ..base };
        assert!(matches!(nan.validate(), Err(ParamsError::StaticShare(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: LinkerParams = serde_json::from_str(r#"{"link_cost": 50}"#).unwrap();
        assert_eq!(params.link_cost, 50);
        assert_eq!(params.tick_threshold, 5000);
        assert_eq!(params.static_share, 0.1);
    }
}
