use crate::logic::eval_constants::{
    BACK_ROW_GUARD, CAPTURE_THREAT, CENTER_CONTROL, KING_COUNT_BONUS, PROTECTED_PIECE, PYRAMID,
    SAFE_PIECE, UNSAFE_PIECE, VAL_KING, VAL_MAN,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_man: i32,
    pub val_king: i32,
    pub king_count_bonus: i32,
    pub safe_piece: i32,
    pub unsafe_piece: i32,
    pub capture_threat: i32,
    pub center_control: i32,
    pub protected_piece: i32,
    pub back_row_guard: i32,
    pub pyramid: i32,

    // Search Parameters
    pub search_depth: u8, // Used when the mover is not an AI player
    pub alpha_beta: bool, // false: full-width minimax

    // Opening Book
    pub use_opening_book: bool,
    pub opening_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_man: VAL_MAN,
            val_king: VAL_KING,
            king_count_bonus: KING_COUNT_BONUS,
            safe_piece: SAFE_PIECE,
            unsafe_piece: UNSAFE_PIECE,
            capture_threat: CAPTURE_THREAT,
            center_control: CENTER_CONTROL,
            protected_piece: PROTECTED_PIECE,
            back_row_guard: BACK_ROW_GUARD,
            pyramid: PYRAMID,

            search_depth: 4,
            alpha_beta: true,

            use_opening_book: true,
            opening_seed: None,
        }
    }
}

/// Weights given as multipliers of the defaults, everything else absolute.
#[derive(Deserialize)]
struct EngineConfigJson {
    val_man: Option<f32>,
    val_king: Option<f32>,
    king_count_bonus: Option<f32>,
    safe_piece: Option<f32>,
    unsafe_piece: Option<f32>,
    capture_threat: Option<f32>,
    center_control: Option<f32>,
    protected_piece: Option<f32>,
    back_row_guard: Option<f32>,
    pyramid: Option<f32>,

    search_depth: Option<u8>,
    alpha_beta: Option<bool>,

    use_opening_book: Option<bool>,
    opening_seed: Option<u64>,
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_man: apply_scale(default.val_man, json_config.val_man),
            val_king: apply_scale(default.val_king, json_config.val_king),
            king_count_bonus: apply_scale(default.king_count_bonus, json_config.king_count_bonus),
            safe_piece: apply_scale(default.safe_piece, json_config.safe_piece),
            unsafe_piece: apply_scale(default.unsafe_piece, json_config.unsafe_piece),
            capture_threat: apply_scale(default.capture_threat, json_config.capture_threat),
            center_control: apply_scale(default.center_control, json_config.center_control),
            protected_piece: apply_scale(default.protected_piece, json_config.protected_piece),
            back_row_guard: apply_scale(default.back_row_guard, json_config.back_row_guard),
            pyramid: apply_scale(default.pyramid, json_config.pyramid),

            search_depth: json_config.search_depth.unwrap_or(default.search_depth),
            alpha_beta: json_config.alpha_beta.unwrap_or(default.alpha_beta),

            use_opening_book: json_config
                .use_opening_book
                .unwrap_or(default.use_opening_book),
            opening_seed: json_config.opening_seed.or(default.opening_seed),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
