//! Pipeline model: funnels and their ordered stages.

use serde::Serialize;
use utoipa::ToSchema;

/// A named pipeline of ordered stages through which a project progresses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Funnel {
    pub id: i32,
    pub name: String,
}

/// One step in a funnel. `order` defines sort/progression order within the
/// funnel; values need not be contiguous.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FunnelStage {
    pub id: i32,
    pub funnel_id: i32,
    pub name: String,
    pub order: i32,
}

/// Order assigned by the append path: one past the current maximum,
/// starting at 1 for an empty funnel.
pub fn append_order(max_existing: Option<i32>) -> i32 {
    max_existing.map_or(1, |m| m + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_to_empty_funnel_starts_at_one() {
        assert_eq!(append_order(None), 1);
    }

    #[test]
    fn append_goes_one_past_the_maximum() {
        assert_eq!(append_order(Some(4)), 5);
        // Orders need not be contiguous; append still takes max + 1
        assert_eq!(append_order(Some(40)), 41);
    }
}
