//! Display labels for analytics fields.
//!
//! The second header row shows a human-readable label for each field. Labels
//! come from an explicit [`LabelTable`] handed to the conversion, so callers
//! can swap in their own table. Unknown fields are labelled with their own
//! name.

use crate::common::{Error, Result};
use phf::phf_map;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Built-in labels for the live-room analytics feed.
///
/// Uses perfect hash function for O(1) lookup with zero runtime cost.
static ANALYTICS_FIELD_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "timeMinute" => "时刻",
    "commentCnt" => "评论数",
    "commentCntRank" => "互动高峰",
    "commentUcnt" => "评论人数",
    "costDiamonds" => "消耗钻石数",
    "consumeUcnt" => "送礼人数",
    "earnScore" => "音浪",
    "earnScoreRank" => "送礼高峰",
    "expectMinute" => "预计扶持时长",
    "expectWatchCnt" => "预计进房数量",
    "followUcnt" => "关注人数",
    "likeCnt" => "点赞数",
    "likeUcnt" => "点赞人数",
    "lottery" => "抽奖",
    "luckymoneyCnt" => "福袋钻石数",
    "operatorID" => "操作员ID",
    "operatorName" => "操作员名字",
    "pcuTotal" => "在线人数",
    "realMinute" => "实际扶持时长",
    "realWatchCnt" => "实际进房数量",
    "watchUcnt" => "进入直播间人数",
    "watchUcntRank" => "在线观众高峰",
    "keyEvent" => "关键事件",
};

#[derive(Debug, Clone)]
enum Source {
    Static(&'static phf::Map<&'static str, &'static str>),
    Owned(HashMap<String, String>),
}

/// Immutable field-name to label mapping.
#[derive(Debug, Clone)]
pub struct LabelTable {
    source: Source,
}

impl LabelTable {
    /// The built-in analytics labels.
    pub fn analytics() -> Self {
        Self {
            source: Source::Static(&ANALYTICS_FIELD_LABELS),
        }
    }

    /// A table with no entries; every field is labelled with its own name.
    pub fn empty() -> Self {
        Self::from_pairs(std::iter::empty::<(String, String)>())
    }

    /// Build a table from `(field, label)` pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            source: Source::Owned(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Load a table from a flat JSON object of `"field": "label"` entries.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| Error::MalformedDocument(format!("label table is not valid JSON: {}", e)))?;
        let object = value.as_object().ok_or_else(|| {
            Error::TypeMismatch("label table must be a JSON object".to_string())
        })?;

        let mut labels = HashMap::with_capacity(object.len());
        for (field, label) in object {
            let label = label.as_str().ok_or_else(|| {
                Error::TypeMismatch(format!("label for '{}' must be a string", field))
            })?;
            labels.insert(field.clone(), label.to_string());
        }
        Ok(Self {
            source: Source::Owned(labels),
        })
    }

    /// Label for `field`, falling back to the field name itself.
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.get(field).unwrap_or(field)
    }

    /// Label for `field` if the table has one.
    pub fn get(&self, field: &str) -> Option<&str> {
        match &self.source {
            Source::Static(map) => map.get(field).copied(),
            Source::Owned(map) => map.get(field).map(String::as_str),
        }
    }

    pub fn len(&self) -> usize {
        match &self.source {
            Source::Static(map) => map.len(),
            Source::Owned(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels for `fields`, in order.
    pub fn labels_for<'a>(&'a self, fields: &'a [String]) -> Vec<&'a str> {
        fields.iter().map(|field| self.label(field)).collect()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::analytics()
    }
}
