use jiff::Timestamp;
use serde::Deserialize;

/// User profile returned by `GET /api/v2/users/{user}/{mode?}`.
///
/// Every field tolerates absence so that schema drift on the server side
/// does not fail the whole response.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub playmode: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub discord: Option<String>,
    pub interests: Option<String>,
    pub title: Option<String>,
    pub badges: Vec<ProfileBadge>,
    pub statistics: Option<ProfileStatistics>,
    pub kudosu: Option<ProfileKudosu>,
    pub avatar_url: Option<String>,
    pub cover_url: Option<String>,
    pub has_supported: bool,
    pub join_date: Option<Timestamp>,
    #[serde(rename = "last_visit")]
    pub last_visit_date: Option<Timestamp>,
    #[serde(rename = "user_achievements")]
    pub achievements: Vec<ProfileAchievement>,
    pub country_code: Option<String>,
    pub default_group: Option<String>,
    #[serde(rename = "profile_colour")]
    pub profile_color: Option<String>,
    #[serde(rename = "is_active")]
    pub active: bool,
    #[serde(rename = "is_bot")]
    pub bot: bool,
    #[serde(rename = "is_deleted")]
    pub deleted: bool,
    #[serde(rename = "is_online")]
    pub online: bool,
    #[serde(rename = "is_supporter")]
    pub supporter: bool,
    pub pm_friends_only: bool,
    pub support_level: u64,
    #[serde(rename = "scores_first_count")]
    pub first_places: u64,
    #[serde(rename = "follower_count")]
    pub followers: u64,
    #[serde(rename = "favourite_beatmapset_count")]
    pub favourite_beatmaps: u64,
    #[serde(rename = "unranked_beatmapset_count")]
    pub unranked_beatmaps: u64,
    #[serde(rename = "graveyard_beatmapset_count")]
    pub graveyard_beatmaps: u64,
    #[serde(rename = "loved_beatmapset_count")]
    pub loved_beatmaps: u64,
    #[serde(rename = "ranked_and_approved_beatmapset_count")]
    pub ranked_and_approved_beatmaps: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileBadge {
    pub description: String,
    pub url: Option<String>,
    pub awarded_at: Option<Timestamp>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileAchievement {
    #[serde(rename = "achievement_id")]
    pub id: u64,
    pub achieved_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileKudosu {
    pub total: i64,
    pub available: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileStatistics {
    pub level: ProfileStatisticsLevel,
    #[serde(rename = "pp")]
    pub performance_points: Option<f64>,
    /// `None` for users without a global rank.
    pub global_rank: Option<u64>,
    pub ranked_score: u64,
    pub hit_accuracy: f64,
    pub play_count: u64,
    pub play_time: Option<u64>,
    pub total_score: u64,
    pub total_hits: u64,
    pub maximum_combo: u64,
    pub is_ranked: bool,
    #[serde(rename = "grade_counts")]
    pub grades: ProfileStatisticsGrades,
    pub rank: ProfileStatisticsRank,
    pub replays_watched_by_others: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileStatisticsLevel {
    pub current: u64,
    pub progress: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileStatisticsGrades {
    pub ss: u64,
    pub ssh: u64,
    pub s: u64,
    pub sh: u64,
    pub a: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProfileStatisticsRank {
    pub global: Option<u64>,
    pub country: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_profile_decodes() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id": 2, "username": "peppy"}"#).unwrap();
        assert_eq!(profile.id, 2);
        assert_eq!(profile.username, "peppy");
        assert!(profile.statistics.is_none());
        assert!(profile.badges.is_empty());
    }

    #[test]
    fn nullable_fields_accept_null() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "id": 7,
                "username": "x",
                "twitter": null,
                "statistics": {"global_rank": null, "pp": null, "rank": {"global": null, "country": null}},
                "join_date": "2007-08-28T05:58:16+00:00"
            }"#,
        )
        .unwrap();
        let stats = profile.statistics.unwrap();
        assert!(stats.global_rank.is_none());
        assert!(stats.rank.country.is_none());
        assert!(profile.join_date.is_some());
    }

    #[test]
    fn renamed_fields_map() {
        let profile: UserProfile = serde_json::from_str(
            r##"{"is_online": true, "follower_count": 31, "profile_colour": "#ffcc22",
                "user_achievements": [{"achievement_id": 4, "achieved_at": "2020-01-01T00:00:00Z"}]}"##,
        )
        .unwrap();
        assert!(profile.online);
        assert_eq!(profile.followers, 31);
        assert_eq!(profile.profile_color.as_deref(), Some("#ffcc22"));
        assert_eq!(profile.achievements[0].id, 4);
    }
}
