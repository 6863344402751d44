//! End-to-end flows through a fully wired site

use serleo::assist::{AssistError, AssistResult, ChatTurn, GenerativeClient};
use serleo::auth::{AuthError, SignUpRequest};
use serleo::content::{ContentError, ForumMessage, PartnershipInquiry, Post, Testimonial};
use serleo::{Error, Site, UserRole};
use std::sync::Arc;

/// Backend that always answers the same thing
struct CannedClient;

impl GenerativeClient for CannedClient {
    fn complete(&self, _prompt: &str, _history: &[ChatTurn]) -> AssistResult<String> {
        Ok("Serleo runs agricultural and community programs.".into())
    }
    fn generate_image(&self, prompt: &str) -> AssistResult<String> {
        Ok(format!("https://cdn.example/{}.png", prompt.len()))
    }
}

/// Backend that always fails
struct OfflineClient;

impl GenerativeClient for OfflineClient {
    fn complete(&self, _prompt: &str, _history: &[ChatTurn]) -> AssistResult<String> {
        Err(AssistError::Unavailable("offline".into()))
    }
    fn generate_image(&self, _prompt: &str) -> AssistResult<String> {
        Err(AssistError::Unavailable("offline".into()))
    }
}

fn site() -> Site {
    Site::in_memory(Arc::new(CannedClient)).unwrap()
}

fn sign_up(site: &Site, name: &str, email: &str) -> serleo::UserProfile {
    site.users
        .sign_up(&SignUpRequest {
            name: name.into(),
            email: email.into(),
            password: "secret123".into(),
            confirm_password: "secret123".into(),
        })
        .unwrap()
}

#[test]
fn test_member_posts_to_forum() {
    let site = site();
    let profile = sign_up(&site, "Amina", "amina@example.org");
    let logged_in = site.users.login("amina@example.org", "secret123").unwrap();
    assert_eq!(logged_in.user_id, profile.user_id);

    site.forum
        .post(&ForumMessage {
            content: "Hello everyone!".into(),
            user_id: profile.user_id.to_string(),
            user_name: profile.name.clone(),
            user_role: profile.role,
        })
        .unwrap();

    let latest = site.forum.latest().unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].item.content, "Hello everyone!");
    assert_eq!(latest[0].item.user_role, UserRole::User);
}

#[test]
fn test_forum_retains_last_two_hundred_messages() {
    let site = site();
    let profile = sign_up(&site, "Amina", "amina@example.org");

    for i in 1..=205 {
        site.forum
            .post(&ForumMessage {
                content: format!("message {i}"),
                user_id: profile.user_id.to_string(),
                user_name: profile.name.clone(),
                user_role: profile.role,
            })
            .unwrap();
    }

    assert_eq!(site.forum.total().unwrap(), 200);
    let latest = site.forum.latest().unwrap();
    assert_eq!(latest.len(), 200);
    // Oldest retained first, newest last.
    assert_eq!(latest[0].item.content, "message 6");
    assert_eq!(latest[199].item.content, "message 205");
}

#[test]
fn test_inquiries_retain_last_hundred() {
    let site = site();
    for i in 1..=102 {
        site.inquiries
            .submit(&PartnershipInquiry {
                name: "Kofi Mensah".into(),
                email: "kofi@example.org".into(),
                company: None,
                message: format!("Inquiry number {i}, about a joint program."),
            })
            .unwrap();
    }

    assert_eq!(site.inquiries.total().unwrap(), 100);
    let recent = site.inquiries.recent(5).unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent[0].item.message.contains("number 102"));
}

#[test]
fn test_admin_lifecycle() {
    let site = site();
    let root = site
        .users
        .admin_sign_up(&SignUpRequest {
            name: "Root".into(),
            email: "root@example.org".into(),
            password: "secret123".into(),
            confirm_password: "secret123".into(),
        })
        .unwrap();
    assert_eq!(root.role, UserRole::Superadmin);

    // Only the first admin sign-up ever succeeds.
    let second = site.users.admin_sign_up(&SignUpRequest {
        name: "Second".into(),
        email: "second@example.org".into(),
        password: "secret123".into(),
        confirm_password: "secret123".into(),
    });
    assert_eq!(second, Err(AuthError::AdminExists));

    // Members can still be promoted and demoted.
    let member = sign_up(&site, "Member", "m@example.org");
    site.users
        .update_role(member.user_id, UserRole::Admin)
        .unwrap();
    assert_eq!(site.users.get(member.user_id).unwrap().role, UserRole::Admin);

    // The original admin stays superadmin and cannot be demoted.
    assert_eq!(site.users.get(root.user_id).unwrap().role, UserRole::Superadmin);
    assert_eq!(
        site.users.update_role(root.user_id, UserRole::User),
        Err(AuthError::SuperadminImmutable)
    );
}

#[test]
fn test_post_management() {
    let site = site();
    let project = site
        .posts
        .create(&Post {
            title: "AgriVenture 2026".into(),
            kind: "Project".into(),
            description: "A season-long agricultural program.".into(),
            image_url: "https://img.example.com/agri.png".into(),
            ai_hint: "farm landscape".into(),
        })
        .unwrap();
    site.posts
        .create(&Post {
            title: "Harvest Insights".into(),
            kind: "Insight".into(),
            description: "Lessons from the latest season.".into(),
            image_url: "https://img.example.com/harvest.png".into(),
            ai_hint: "golden field".into(),
        })
        .unwrap();

    assert_eq!(site.posts.list(None).unwrap().len(), 2);
    let projects = site.posts.list(Some("Project")).unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].item.title, "AgriVenture 2026");

    let fetched = site.posts.get(project.id).unwrap();
    assert_eq!(fetched.item.title, "AgriVenture 2026");

    site.posts.delete(project.id).unwrap();
    assert!(matches!(
        site.posts.get(project.id),
        Err(ContentError::Store(Error::NotFound { .. }))
    ));
    assert_eq!(site.posts.total().unwrap(), 1);
}

#[test]
fn test_testimonial_management() {
    let site = site();
    let stored = site
        .testimonials
        .create(&Testimonial {
            name: "Kofi".into(),
            title: "CEO, Example Ltd".into(),
            quote: "A transformative partnership for us.".into(),
            avatar: "https://img.example.com/kofi.png".into(),
        })
        .unwrap();
    assert_eq!(site.testimonials.list().unwrap().len(), 1);

    site.testimonials.delete(stored.id).unwrap();
    assert!(site.testimonials.list().unwrap().is_empty());
}

#[test]
fn test_assistant_and_images_online() {
    let site = site();
    assert_eq!(
        site.assistant.ask("What does Serleo do?", &[]),
        "Serleo runs agricultural and community programs."
    );

    let url = site.images.get_or_generate("hero", "farm landscape").unwrap();
    assert!(url.starts_with("https://cdn.example/"));
    // Cached on second request.
    assert_eq!(site.images.get("hero").unwrap(), Some(url));
}

#[test]
fn test_generative_outage_never_breaks_flows() {
    let site = Site::in_memory(Arc::new(OfflineClient)).unwrap();

    // Content flows are unaffected.
    sign_up(&site, "Amina", "amina@example.org");
    site.inquiries
        .submit(&PartnershipInquiry {
            name: "Kofi Mensah".into(),
            email: "kofi@example.org".into(),
            company: Some("Mensah Farms".into()),
            message: "Interested in a joint program.".into(),
        })
        .unwrap();

    // Generative surfaces degrade instead of erroring.
    assert_eq!(
        site.assistant.ask("hello?", &[]),
        serleo::assist::FALLBACK_REPLY
    );
    let url = site.images.get_or_generate("hero", "farm landscape").unwrap();
    assert!(url.starts_with("https://picsum.photos/seed/"));

    let stats = site.stats().unwrap();
    assert_eq!(stats.collaborations, 1);
    assert_eq!(stats.members, 1);
}
