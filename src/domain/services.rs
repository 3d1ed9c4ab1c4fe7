use crate::domain::model::{add_counts, AggregateSummary, NormalizedSummary};

/// 合併各來源摘要；`None` 代表該來源抓取失敗，不貢獻任何數值。
pub fn merge<'a, I>(summaries: I) -> AggregateSummary
where
    I: IntoIterator<Item = Option<&'a NormalizedSummary>>,
{
    summaries
        .into_iter()
        .flatten()
        .fold(AggregateSummary::default(), |mut merged, summary| {
            merged.total_public_repos += summary.public_repos;
            merged.total_forked_repos += summary.forked_repos;
            merged.total_watchers += summary.watchers;
            add_counts(&mut merged.languages, &summary.languages);
            add_counts(&mut merged.topics, &summary.topics);
            merged
        })
}
