//! Content assistance helpers
//!
//! Simulated writing assistance: post generation, content improvement,
//! idea lists, and hashtag suggestions. Responses come from canned
//! template pools after a transport round trip, mirroring the other
//! simulated backends.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::transport::Transport;
use crate::types::PostStats;

const GENERATED_POSTS: &[&str] = &[
    "Excited to announce our newest feature update! 🚀 Check out how our platform is making social media management easier than ever. #ProductUpdate #SocialMedia",
    "Just dropped: Our comprehensive guide to social media marketing in 2025! Learn the strategies that top brands are using to connect with their audience. #MarketingTips #SocialStrategy",
    "We're thrilled to be featured in @TechCrunch today! Read how our innovative approach is changing the social media landscape. #StartupLife #Innovation",
    "Working remotely? Our latest blog post covers 5 essential tools to boost your productivity while managing social media from anywhere. #RemoteWork #Productivity",
    "Join us for our upcoming webinar on social media analytics! Learn how to turn data into actionable insights. Register now (link in bio) #Analytics #Webinar",
];

const PERFORMANCE_ANALYSES: &[&str] = &[
    "This post performed well with high engagement. The visual content and question format likely contributed to its success.",
    "Performance is below average compared to your other content. Consider posting at a different time or using more engaging visuals.",
    "Great engagement rate! The hashtags used seem to be increasing your reach effectively.",
    "This content had good initial engagement but tapered off quickly. Consider follow-up content to maintain momentum.",
    "The engagement pattern suggests your audience found this highly valuable. Create more content on this topic.",
];

const MARKETING_IDEAS: &[&str] = &[
    "5 Social Media Trends to Watch in 2025",
    "How to Craft the Perfect Social Media Calendar",
    "Case Study: How Brand X Increased Engagement by 200%",
    "The Psychology Behind Viral Content",
    "Social Media Metrics That Actually Matter",
    "Building Community Through Social Media Engagement",
    "Content Repurposing: Get More from Your Social Media Efforts",
];

const PRODUCT_IDEAS: &[&str] = &[
    "Introducing Our New Feature: What You Need to Know",
    "Behind the Scenes: How We Built Our Latest Update",
    "Customer Spotlight: Creative Ways People Use Our Product",
    "Quick Tips to Maximize Your Experience With Our Platform",
    "Product FAQ: Answering Your Most Common Questions",
    "Comparison: How Our Solution Stands Out in the Market",
];

const GENERAL_IDEAS: &[&str] = &[
    "10 Tips to Boost Your Social Media Engagement",
    "How to Create Content That Converts",
    "The Ultimate Guide to Social Media for Beginners",
    "Industry Insights: What's Changing in Social Media",
    "Success Story: From Zero to 10K Followers",
    "Behind the Scenes: A Day in Our Company",
    "Ask Me Anything: Your Questions Answered",
];

const COMMON_HASHTAGS: &[&str] = &[
    "#SocialMedia", "#Marketing", "#DigitalMarketing", "#ContentCreation",
    "#SocialMediaTips", "#MarketingStrategy", "#SMM", "#BusinessTips",
    "#ContentMarketing", "#MarketingTips", "#SocialMediaMarketing",
    "#OnlineMarketing", "#Branding", "#Business", "#Entrepreneur",
    "#Instagram", "#Facebook", "#Twitter", "#LinkedIn", "#Growth",
    "#Engagement", "#Strategy", "#Success", "#Productivity", "#Innovation",
];

/// Simulated writing assistant
#[derive(Clone)]
pub struct Assistant {
    transport: Arc<dyn Transport>,
}

impl Assistant {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Generate a post from a prompt
    pub async fn generate_post(&self, prompt: &str) -> String {
        self.transport.round_trip("generate_post").await;
        tracing::debug!(prompt, "generated post from template pool");
        pick_one(GENERATED_POSTS).to_string()
    }

    /// Improve existing content
    ///
    /// Content shorter than ten characters is too thin to work with and
    /// gets a prompt to add more instead.
    pub async fn improve_content(&self, content: &str) -> String {
        self.transport.round_trip("improve_content").await;
        if content.len() > 10 {
            format!(
                "{} [AI Enhanced] 🚀 Don't forget to engage with your audience by asking a question! What do you think about this? #trending",
                content
            )
        } else {
            "We need more content to improve. Try adding more details to your post!".to_string()
        }
    }

    /// Summarize how a post performed based on its stats
    pub async fn analyze_performance(&self, _stats: &PostStats) -> String {
        self.transport.round_trip("analyze_performance").await;
        pick_one(PERFORMANCE_ANALYSES).to_string()
    }

    /// Suggest content ideas for a topic
    pub async fn content_ideas(&self, topic: &str, count: usize) -> Vec<String> {
        self.transport.round_trip("content_ideas").await;

        let topic_lower = topic.to_lowercase();
        let pool: &[&str] = if topic_lower.contains("market") {
            MARKETING_IDEAS
        } else if topic_lower.contains("product") {
            PRODUCT_IDEAS
        } else {
            GENERAL_IDEAS
        };

        let mut ideas: Vec<&str> = pool.to_vec();
        ideas.shuffle(&mut rand::thread_rng());
        ideas.into_iter().take(count).map(str::to_string).collect()
    }

    /// Suggest hashtags for content
    pub async fn suggest_hashtags(&self, _content: &str, count: usize) -> Vec<String> {
        self.transport.round_trip("suggest_hashtags").await;

        let count = count.min(COMMON_HASHTAGS.len());
        let mut pool: Vec<&str> = COMMON_HASHTAGS.to_vec();
        pool.shuffle(&mut rand::thread_rng());
        pool.into_iter().take(count).map(str::to_string).collect()
    }
}

fn pick_one<'a>(pool: &'a [&'a str]) -> &'a str {
    pool[rand::thread_rng().gen_range(0..pool.len())]
}
