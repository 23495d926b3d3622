use crate::domain::model::ClusterSet;

/// The first cluster containing `domain`, or an empty list.
pub fn similar_domains(clusters: Option<&ClusterSet>, domain: &str) -> Vec<String> {
    clusters
        .and_then(|set| {
            set.clusters
                .iter()
                .flatten()
                .find(|cluster| cluster.iter().any(|member| member == domain))
        })
        .cloned()
        .unwrap_or_default()
}
