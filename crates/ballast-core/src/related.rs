//! Related-post selection
//!
//! Candidates fill the available slots tier by tier:
//! 1. the post's curated `related` slugs, in listed order
//! 2. posts sharing tags, most shared tags first
//! 3. posts by the same author
//! 4. everything else, newest first
//!
//! A later tier never displaces an earlier one. Ties inside tiers 2 and 3
//! go to the newer post, then to corpus order.

use crate::models::Post;
use std::collections::HashSet;

pub fn related_posts<'a>(target: &Post, corpus: &'a [Post], limit: usize) -> Vec<&'a Post> {
    let mut picked: Vec<&'a Post> = Vec::with_capacity(limit);
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(target.slug.as_str());

    let mut take = |candidates: Vec<&'a Post>, picked: &mut Vec<&'a Post>| {
        for post in candidates {
            if picked.len() >= limit {
                break;
            }
            if seen.insert(post.slug.as_str()) {
                picked.push(post);
            }
        }
    };

    // Curated
    let curated: Vec<&Post> = target
        .related
        .iter()
        .filter_map(|slug| corpus.iter().find(|post| post.slug == *slug))
        .collect();
    take(curated, &mut picked);

    // Shared tags
    let target_tags: HashSet<&str> = target.tags.iter().map(String::as_str).collect();
    let mut tagged: Vec<(usize, &Post)> = corpus
        .iter()
        .map(|post| {
            let shared = post
                .tags
                .iter()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .intersection(&target_tags)
                .count();
            (shared, post)
        })
        .filter(|(shared, _)| *shared > 0)
        .collect();
    tagged.sort_by(|(a_shared, a), (b_shared, b)| {
        b_shared
            .cmp(a_shared)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });
    take(tagged.into_iter().map(|(_, post)| post).collect(), &mut picked);

    // Same author
    let mut same_author: Vec<&Post> = corpus
        .iter()
        .filter(|post| post.author == target.author)
        .collect();
    same_author.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    take(same_author, &mut picked);

    // Recent
    let mut recent: Vec<&Post> = corpus.iter().collect();
    recent.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    take(recent, &mut picked);

    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, author: &str, tags: &[&str], day: u32) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            author: author.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            published_at: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            related: vec![],
            summary: None,
        }
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_cascade_order() {
        let mut target = post("target", "ana", &["tutorial"], 10);
        target.related = vec!["post-a".to_string()];

        let corpus = vec![
            post("post-d", "zoe", &["news"], 30),
            post("post-c", "ana", &["budgeting"], 5),
            post("post-b", "max", &["tutorial"], 2),
            post("post-a", "max", &["release"], 1),
            target.clone(),
        ];

        let related = related_posts(&target, &corpus, 4);
        assert_eq!(slugs(&related), vec!["post-a", "post-b", "post-c", "post-d"]);
    }

    #[test]
    fn test_more_shared_tags_rank_first() {
        let target = post("target", "ana", &["tutorial", "budgeting", "sync"], 10);
        let corpus = vec![
            post("one-tag", "max", &["tutorial"], 20),
            post("three-tags", "max", &["tutorial", "budgeting", "sync"], 1),
            post("two-tags", "max", &["budgeting", "sync"], 2),
        ];
        let related = related_posts(&target, &corpus, 3);
        assert_eq!(slugs(&related), vec!["three-tags", "two-tags", "one-tag"]);
    }

    #[test]
    fn test_limit_and_no_duplicates() {
        let mut target = post("target", "ana", &["tutorial"], 10);
        target.related = vec!["b".to_string(), "b".to_string(), "missing".to_string()];
        let corpus = vec![
            post("a", "ana", &["tutorial"], 3),
            post("b", "ana", &["tutorial"], 4),
            post("c", "zoe", &[], 9),
            target.clone(),
        ];

        let related = related_posts(&target, &corpus, 2);
        assert_eq!(slugs(&related), vec!["b", "a"]);

        let related = related_posts(&target, &corpus, 10);
        assert_eq!(slugs(&related), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_earlier_tiers_beat_recency() {
        let target = post("target", "ana", &[], 10);
        let corpus = vec![
            post("newest", "zoe", &[], 31),
            post("same-author-old", "ana", &[], 1),
        ];
        let related = related_posts(&target, &corpus, 1);
        assert_eq!(slugs(&related), vec!["same-author-old"]);
    }

    #[test]
    fn test_zero_limit() {
        let target = post("target", "ana", &[], 10);
        let corpus = vec![post("x", "ana", &[], 1)];
        assert!(related_posts(&target, &corpus, 0).is_empty());
    }
}
