//! Static table of health recommendations keyed by category and topic.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Recommendation for one topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicInfo {
    pub recommendation: &'static str,
    pub benefits: &'static str,
}

/// A topic matched by [`KnowledgeBase::search`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub category: &'static str,
    pub topic: &'static str,
    pub info: TopicInfo,
}

type Topics = IndexMap<&'static str, TopicInfo>;

static HEALTH_DATA: Lazy<IndexMap<&'static str, Topics>> = Lazy::new(|| {
    let topic = |recommendation, benefits| TopicInfo { recommendation, benefits };

    IndexMap::from([
        ("diet", IndexMap::from([
            ("water", topic(
                "Drink at least 8 glasses (2 liters) of water daily",
                "Improves skin health, aids digestion, boosts energy",
            )),
            ("fruits_vegetables", topic(
                "Eat at least 5 servings of fruits and vegetables daily",
                "Provides essential vitamins, minerals, and fiber",
            )),
        ])),
        ("exercise", IndexMap::from([
            ("cardio", topic(
                "150 minutes of moderate or 75 minutes of vigorous cardio weekly",
                "Improves heart health, boosts mood, helps with weight management",
            )),
            ("strength", topic(
                "Strength training exercises 2-3 times per week",
                "Builds muscle, increases metabolism, strengthens bones",
            )),
        ])),
        ("sleep", IndexMap::from([
            ("duration", topic(
                "7-9 hours of quality sleep per night",
                "Improves memory, boosts immune system, enhances mood",
            )),
            ("quality", topic(
                "Maintain consistent sleep schedule and create restful environment",
                "More restorative sleep, better energy levels, improved health",
            )),
        ])),
    ])
});

/// Read-only view of the recommendation table
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    data: &'static IndexMap<&'static str, Topics>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    /// Create a view of the built-in table
    pub fn new() -> Self {
        Self { data: &HEALTH_DATA }
    }

    /// Exact lookup of one topic
    pub fn get_info(&self, category: &str, topic: &str) -> Option<TopicInfo> {
        self.data.get(category)?.get(topic).copied()
    }

    /// Case-insensitive substring search over category, topic and recommendation.
    ///
    /// Benefits are not searched. Results keep table order.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.to_lowercase();

        self.data
            .iter()
            .flat_map(|(category, topics)| {
                topics.iter().map(move |(topic, info)| SearchResult {
                    category: *category,
                    topic: *topic,
                    info: *info,
                })
            })
            .filter(|result| {
                result.category.to_lowercase().contains(&query)
                    || result.topic.to_lowercase().contains(&query)
                    || result.info.recommendation.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Category names with their topic names, in table order
    pub fn categories(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        self.data
            .iter()
            .map(|(category, topics)| (*category, topics.keys().copied().collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_info_exact_match() {
        let kb = KnowledgeBase::new();

        let info = kb.get_info("sleep", "duration").unwrap();
        assert_eq!(info.recommendation, "7-9 hours of quality sleep per night");

        assert!(kb.get_info("sleep", "naps").is_none());
        assert!(kb.get_info("Sleep", "duration").is_none(), "lookup is case-sensitive");
        assert!(kb.get_info("stress", "duration").is_none());
    }

    #[test]
    fn test_search_matches_category_topic_and_recommendation() {
        let kb = KnowledgeBase::new();

        let by_category: Vec<_> = kb.search("EXERCISE").iter().map(|r| r.topic).collect();
        assert_eq!(by_category, vec!["cardio", "strength"]);

        let by_topic: Vec<_> = kb.search("water").iter().map(|r| r.topic).collect();
        assert_eq!(by_topic, vec!["water"]);

        // "vegetables" appears in the fruits_vegetables topic and its recommendation
        assert_eq!(kb.search("vegetables").len(), 1);

        // "schedule" appears only in a recommendation
        let by_recommendation = kb.search("schedule");
        assert_eq!(by_recommendation.len(), 1);
        assert_eq!(by_recommendation[0].category, "sleep");
        assert_eq!(by_recommendation[0].topic, "quality");
    }

    #[test]
    fn test_search_ignores_benefits() {
        // "digestion" only occurs in the benefits of diet/water
        assert!(KnowledgeBase::new().search("digestion").is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything_in_order() {
        let results = KnowledgeBase::new().search("");
        let keys: Vec<_> = results.iter().map(|r| (r.category, r.topic)).collect();
        assert_eq!(keys, vec![
            ("diet", "water"),
            ("diet", "fruits_vegetables"),
            ("exercise", "cardio"),
            ("exercise", "strength"),
            ("sleep", "duration"),
            ("sleep", "quality"),
        ]);
    }

    #[test]
    fn test_categories_lists_topics() {
        let categories = KnowledgeBase::new().categories();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0], ("diet", vec!["water", "fruits_vegetables"]));
    }
}
