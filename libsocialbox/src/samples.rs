//! Built-in sample data
//!
//! Seed posts are written on the first fetch when no state exists yet,
//! so a fresh install has something to show. Trends and freelancers are
//! read-only reference data rebuilt on every fetch.

use chrono::{Duration, Utc};

use crate::types::{FreelancerProfile, PlatformKind, Post, PostStats, PostStatus, SocialTrend};

/// Posts seeded into an empty store on first fetch
pub fn seed_posts() -> Vec<Post> {
    let now = Utc::now();

    let mut published = Post::new(
        "Check out our newest product line, just launched today! #NewProduct #Innovation"
            .to_string(),
        vec![
            PlatformKind::Facebook,
            PlatformKind::Twitter,
            PlatformKind::Instagram,
        ],
        PostStatus::Published,
    );
    published.created_at = now - Duration::days(2);
    published.updated_at = published.created_at;
    published.stats = Some(PostStats {
        likes: Some(245),
        comments: Some(32),
        shares: Some(18),
    });

    let mut scheduled = Post::new(
        "Join our upcoming webinar on social media marketing strategies for 2025.".to_string(),
        vec![PlatformKind::LinkedIn, PlatformKind::Facebook],
        PostStatus::Scheduled,
    );
    scheduled.image = Some(
        "https://images.unsplash.com/photo-1611162617213-7d7a39e9b1d7?q=80&w=2574&auto=format&fit=crop"
            .to_string(),
    );
    scheduled.scheduled_at = Some(now + Duration::days(4));
    scheduled.created_at = now - Duration::days(1);
    scheduled.updated_at = scheduled.created_at;

    let mut draft = Post::new(
        "Looking for feedback on our new website design. What do you think?".to_string(),
        vec![PlatformKind::Twitter, PlatformKind::LinkedIn],
        PostStatus::Draft,
    );
    draft.created_at = now - Duration::hours(12);
    draft.updated_at = draft.created_at;

    vec![published, scheduled, draft]
}

/// Current trending topics across platforms
pub fn trends() -> Vec<SocialTrend> {
    vec![
        SocialTrend {
            id: "1".to_string(),
            platform: PlatformKind::Instagram,
            title: "Reels with Text Overlays".to_string(),
            description: "Short video content with impactful text overlays is gaining massive traction on Instagram".to_string(),
            impressions: 5_400_000,
            growth: 24.5,
            hashtags: vec![
                "#reels".to_string(),
                "#contentcreator".to_string(),
                "#videocontent".to_string(),
            ],
        },
        SocialTrend {
            id: "2".to_string(),
            platform: PlatformKind::Twitter,
            title: "AI Ethics Discussions".to_string(),
            description: "Conversations around ethical AI use and regulations are trending strongly on Twitter".to_string(),
            impressions: 3_200_000,
            growth: 18.2,
            hashtags: vec![
                "#AIethics".to_string(),
                "#technology".to_string(),
                "#futureofAI".to_string(),
            ],
        },
        SocialTrend {
            id: "3".to_string(),
            platform: PlatformKind::LinkedIn,
            title: "Remote Work Culture".to_string(),
            description: "Content about building effective remote team culture continues to grow on LinkedIn".to_string(),
            impressions: 2_100_000,
            growth: 12.8,
            hashtags: vec![
                "#remotework".to_string(),
                "#futureofwork".to_string(),
                "#teamculture".to_string(),
            ],
        },
        SocialTrend {
            id: "4".to_string(),
            platform: PlatformKind::Facebook,
            title: "Sustainable Business Practices".to_string(),
            description: "Posts highlighting sustainable and eco-friendly business initiatives are gaining engagement".to_string(),
            impressions: 4_300_000,
            growth: 15.6,
            hashtags: vec![
                "#sustainability".to_string(),
                "#ecofriendly".to_string(),
                "#greeninitiative".to_string(),
            ],
        },
    ]
}

/// Freelancer directory entries
pub fn freelancers() -> Vec<FreelancerProfile> {
    vec![
        FreelancerProfile {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            title: "Social Media Strategist".to_string(),
            skills: vec![
                "Content Strategy".to_string(),
                "Instagram".to_string(),
                "TikTok".to_string(),
                "Analytics".to_string(),
            ],
            rating: 4.9,
            hourly_rate: 65,
            completed_jobs: 187,
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=sarah".to_string(),
            available: true,
        },
        FreelancerProfile {
            id: "2".to_string(),
            name: "Michael Chen".to_string(),
            title: "Digital Marketing Specialist".to_string(),
            skills: vec![
                "FB/IG Ads".to_string(),
                "Content Creation".to_string(),
                "SEO".to_string(),
                "Email Marketing".to_string(),
            ],
            rating: 4.8,
            hourly_rate: 75,
            completed_jobs: 124,
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=michael".to_string(),
            available: true,
        },
        FreelancerProfile {
            id: "3".to_string(),
            name: "Emma Rodriguez".to_string(),
            title: "Content Creator & Copywriter".to_string(),
            skills: vec![
                "Copywriting".to_string(),
                "Video Production".to_string(),
                "Branding".to_string(),
                "Photoshop".to_string(),
            ],
            rating: 4.7,
            hourly_rate: 60,
            completed_jobs: 93,
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=emma".to_string(),
            available: false,
        },
        FreelancerProfile {
            id: "4".to_string(),
            name: "David Kim".to_string(),
            title: "LinkedIn & B2B Specialist".to_string(),
            skills: vec![
                "LinkedIn Strategy".to_string(),
                "B2B Marketing".to_string(),
                "Lead Generation".to_string(),
                "Analytics".to_string(),
            ],
            rating: 4.9,
            hourly_rate: 85,
            completed_jobs: 156,
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=david".to_string(),
            available: true,
        },
        FreelancerProfile {
            id: "5".to_string(),
            name: "Priya Patel".to_string(),
            title: "Social Media Ads Expert".to_string(),
            skills: vec![
                "Meta Ads".to_string(),
                "Google Ads".to_string(),
                "PPC".to_string(),
                "Campaign Management".to_string(),
            ],
            rating: 4.8,
            hourly_rate: 70,
            completed_jobs: 142,
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=priya".to_string(),
            available: true,
        },
    ]
}
