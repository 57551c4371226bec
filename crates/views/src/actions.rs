//! Write actions behind the screens.
//!
//! Each action writes through the record store and returns the written
//! record. Nothing here touches a loaded snapshot; callers reload.

use chrono::NaiveDate;
use socialdesk_core::comments::{append_comment, new_comment};
use socialdesk_core::error::CoreError;
use socialdesk_core::financial::mark_paid;
use socialdesk_core::media::{MediaSet, MediaSlot, UploadedMedia};
use socialdesk_core::models::billing::Billing;
use socialdesk_core::models::client::{Client, ProfileUpdate, UpdateClient};
use socialdesk_core::models::post::{Post, UpdatePost};
use socialdesk_core::models::user::CurrentUser;
use socialdesk_core::roles::{can_client_approve, can_set_status};
use socialdesk_core::status::PostStatus;
use socialdesk_core::types::Timestamp;
use socialdesk_store::{records, Entity, FileUploader, RecordStore, UploadFile};

use crate::error::ViewResult;
use crate::screens::portal::resolve_client;

pub async fn create<E: Entity>(store: &dyn RecordStore, input: &E::Create) -> ViewResult<E> {
    let created = records::<E>(store).create(input).await?;
    tracing::info!(entity = E::NAME, "Record created");
    Ok(created)
}

pub async fn update<E: Entity>(store: &dyn RecordStore, id: &str, input: &E::Update) -> ViewResult<E> {
    let updated = records::<E>(store).update(id, input).await?;
    tracing::info!(entity = E::NAME, id, "Record updated");
    Ok(updated)
}

pub async fn delete<E: Entity>(store: &dyn RecordStore, id: &str) -> ViewResult<()> {
    records::<E>(store).delete(id).await?;
    tracing::info!(entity = E::NAME, id, "Record deleted");
    Ok(())
}

/// Fail unless `user` is agency staff or the owner of `post`.
async fn ensure_post_access(store: &dyn RecordStore, user: &CurrentUser, post: &Post) -> ViewResult<()> {
    if user.is_agency() {
        return Ok(());
    }
    let client = resolve_client(store, user).await?;
    if client.id != post.client_id {
        return Err(CoreError::Forbidden(format!("Post {} belongs to another client", post.id)).into());
    }
    Ok(())
}

/// Set a post's status. Any transition is allowed, but client users cannot
/// mark a post as posted.
pub async fn change_post_status(
    store: &dyn RecordStore,
    user: &CurrentUser,
    post_id: &str,
    status: PostStatus,
) -> ViewResult<Post> {
    let posts = records::<Post>(store);
    let post = posts.get(post_id).await?;
    ensure_post_access(store, user, &post).await?;
    if !can_set_status(user.role, post.status, status) {
        return Err(CoreError::Forbidden(format!("Cannot set status '{status}'")).into());
    }

    let updated = posts.update(post_id, &UpdatePost::status(status)).await?;
    tracing::info!(post_id, from = %post.status, to = %status, "Post status changed");
    Ok(updated)
}

/// Append a comment by `user` to a post.
pub async fn add_comment(
    store: &dyn RecordStore,
    user: &CurrentUser,
    post_id: &str,
    text: &str,
    now: Timestamp,
) -> ViewResult<Post> {
    let comment = new_comment(user, text, now)
        .ok_or_else(|| CoreError::Validation("Comment text must not be empty".into()))?;
    let posts = records::<Post>(store);
    let post = posts.get(post_id).await?;
    ensure_post_access(store, user, &post).await?;

    let updated = posts.update(post_id, &append_comment(&post, comment)).await?;
    tracing::info!(post_id, comments = updated.comments.len(), "Comment added");
    Ok(updated)
}

/// Approve a post on behalf of its client.
pub async fn approve_post(store: &dyn RecordStore, user: &CurrentUser, post_id: &str) -> ViewResult<Post> {
    let posts = records::<Post>(store);
    let post = posts.get(post_id).await?;
    ensure_post_access(store, user, &post).await?;
    if !can_client_approve(post.status) {
        return Err(CoreError::Validation(format!(
            "Post is already {} and cannot be approved",
            post.status.label().to_lowercase()
        ))
        .into());
    }

    let updated = posts
        .update(post_id, &UpdatePost::status(PostStatus::Approved))
        .await?;
    tracing::info!(post_id, user = %user.email, "Post approved by client");
    Ok(updated)
}

/// Mark a billing as paid on `today`.
pub async fn mark_billing_paid(
    store: &dyn RecordStore,
    billing_id: &str,
    today: NaiveDate,
) -> ViewResult<Billing> {
    let updated = records::<Billing>(store)
        .update(billing_id, &mark_paid(today))
        .await?;
    tracing::info!(billing_id, "Billing marked as paid");
    Ok(updated)
}

/// Update the profile of the client linked to `user`.
pub async fn update_profile(
    store: &dyn RecordStore,
    user: &CurrentUser,
    profile: ProfileUpdate,
) -> ViewResult<Client> {
    let client = resolve_client(store, user).await?;
    let update = UpdateClient::from(profile);
    let updated = records::<Client>(store)
        .update(client.id.as_str(), &update)
        .await?;
    tracing::info!(client_id = %client.id, "Client profile updated");
    Ok(updated)
}

pub async fn upload_file(uploader: &dyn FileUploader, file: UploadFile) -> ViewResult<String> {
    Ok(uploader.upload(file).await?)
}

/// Upload `files` and attach them to a post, up to the media cap.
pub async fn attach_media(
    store: &dyn RecordStore,
    uploader: &dyn FileUploader,
    post_id: &str,
    files: Vec<UploadFile>,
) -> ViewResult<Post> {
    let posts = records::<Post>(store);
    let post = posts.get(post_id).await?;
    let mut media = MediaSet::of(&post);

    let offered = files.len();
    let mut uploaded = Vec::new();
    for file in files.into_iter().take(media.remaining_slots()) {
        let content_type = file.content_type.clone();
        let url = uploader.upload(file).await?;
        uploaded.push(UploadedMedia::new(url, &content_type));
    }
    let attached = media.attach(uploaded);
    if attached < offered {
        tracing::warn!(post_id, offered, attached, "Media cap reached, extra files skipped");
    }

    Ok(posts.update(post_id, &media.into_update()).await?)
}

pub async fn remove_media(store: &dyn RecordStore, post_id: &str, slot: MediaSlot) -> ViewResult<Post> {
    let posts = records::<Post>(store);
    let post = posts.get(post_id).await?;
    let mut media = MediaSet::of(&post);
    media.remove(slot);
    Ok(posts.update(post_id, &media.into_update()).await?)
}

/// Upload a logo and set it on the client linked to `user`.
pub async fn upload_logo(
    store: &dyn RecordStore,
    uploader: &dyn FileUploader,
    user: &CurrentUser,
    file: UploadFile,
) -> ViewResult<Client> {
    let logo_url = uploader.upload(file).await?;
    update_profile(
        store,
        user,
        ProfileUpdate {
            logo_url: Some(logo_url),
            ..Default::default()
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;
    use serde_json::json;
    use socialdesk_core::roles::Role;
    use socialdesk_core::status::{BillingStatus, MediaType};
    use socialdesk_store::memory::InMemoryBackend;

    use super::*;
    use crate::error::ViewError;

    fn agency() -> CurrentUser {
        CurrentUser {
            email: "admin@agency.com".into(),
            full_name: Some("Agency".into()),
            role: Role::Admin,
        }
    }

    fn ana() -> CurrentUser {
        CurrentUser {
            email: "ana@sol.com".into(),
            full_name: None,
            role: Role::User,
        }
    }

    async fn seeded() -> InMemoryBackend {
        let store = InMemoryBackend::new();
        store
            .seed(
                "Client",
                vec![
                    json!({"id": "c1", "company_name": "Padaria Sol", "user_email": "ana@sol.com"}),
                    json!({"id": "c2", "company_name": "Oficina Lua", "user_email": "leo@lua.com"}),
                ],
            )
            .await;
        store
            .seed(
                "Post",
                vec![
                    json!({"id": "p1", "client_id": "c1", "status": "production"}),
                    json!({"id": "p2", "client_id": "c2", "status": "idea"}),
                    json!({"id": "p3", "client_id": "c1", "status": "posted"}),
                    json!({"id": "p4", "client_id": "c1", "status": "scheduled"}),
                ],
            )
            .await;
        store
            .seed(
                "Billing",
                vec![json!({"id": "b1", "client_id": "c1", "amount": 100, "due_date": "2024-03-01"})],
            )
            .await;
        store
    }

    fn file(name: &str, content_type: &str) -> UploadFile {
        UploadFile {
            file_name: name.into(),
            content_type: content_type.into(),
            bytes: vec![1],
        }
    }

    #[tokio::test]
    async fn agency_can_set_any_status() {
        let store = seeded().await;
        let post = change_post_status(&store, &agency(), "p1", PostStatus::Posted).await.unwrap();
        assert_eq!(post.status, PostStatus::Posted);
        let back = change_post_status(&store, &agency(), "p1", PostStatus::Idea).await.unwrap();
        assert_eq!(back.status, PostStatus::Idea);
    }

    #[tokio::test]
    async fn client_cannot_mark_posted_or_touch_other_posts() {
        let store = seeded().await;
        assert_matches!(
            change_post_status(&store, &ana(), "p1", PostStatus::Posted).await,
            Err(ViewError::Core(CoreError::Forbidden(_)))
        );
        assert_matches!(
            change_post_status(&store, &ana(), "p2", PostStatus::Approved).await,
            Err(ViewError::Core(CoreError::Forbidden(_)))
        );
    }

    #[tokio::test]
    async fn comment_is_appended_with_author() {
        let store = seeded().await;
        add_comment(&store, &agency(), "p1", "first", Utc::now()).await.unwrap();
        let post = add_comment(&store, &ana(), "p1", "  second ", Utc::now()).await.unwrap();
        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[0].author, "Agency");
        assert_eq!(post.comments[1].author, "ana@sol.com");
        assert_eq!(post.comments[1].text, "second");

        assert_matches!(
            add_comment(&store, &ana(), "p1", "   ", Utc::now()).await,
            Err(ViewError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn approval_rules() {
        let store = seeded().await;
        let post = approve_post(&store, &ana(), "p1").await.unwrap();
        assert_eq!(post.status, PostStatus::Approved);
        assert_matches!(
            approve_post(&store, &ana(), "p1").await,
            Err(ViewError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            approve_post(&store, &ana(), "p3").await,
            Err(ViewError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn scheduled_post_cannot_be_approved() {
        let store = seeded().await;
        assert_matches!(
            approve_post(&store, &ana(), "p4").await,
            Err(ViewError::Core(CoreError::Validation(_)))
        );
        let post = records::<Post>(&store).get("p4").await.unwrap();
        assert_eq!(post.status, PostStatus::Scheduled);
    }

    #[tokio::test]
    async fn mark_paid_writes_status_and_date() {
        let store = seeded().await;
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let billing = mark_billing_paid(&store, "b1", today).await.unwrap();
        assert_eq!(billing.status, BillingStatus::Paid);
        assert_eq!(billing.payment_date.as_deref(), Some("2024-03-20"));
    }

    #[tokio::test]
    async fn profile_and_logo_update_linked_client() {
        let store = seeded().await;
        let client = update_profile(
            &store,
            &ana(),
            ProfileUpdate {
                target_audience: Some("Neighbours".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(client.id.as_str(), "c1");
        assert_eq!(client.target_audience.as_deref(), Some("Neighbours"));

        let client = upload_logo(&store, &store, &ana(), file("logo.png", "image/png"))
            .await
            .unwrap();
        let logo = client.logo_url.unwrap();
        assert!(store.file(&logo).await.is_some());
        assert_eq!(client.target_audience.as_deref(), Some("Neighbours"));
    }

    #[tokio::test]
    async fn media_attach_and_remove() {
        let store = seeded().await;
        let post = attach_media(
            &store,
            &store,
            "p1",
            vec![file("a.jpg", "image/jpeg"), file("b.jpg", "image/jpeg")],
        )
        .await
        .unwrap();
        assert!(post.media_url.is_some());
        assert_eq!(post.media_urls.len(), 1);
        assert_eq!(post.media_type, MediaType::Carousel);

        let post = remove_media(&store, "p1", MediaSlot::Primary).await.unwrap();
        assert!(post.media_urls.is_empty());
        assert_eq!(post.media_type, MediaType::Image);
        assert_eq!(post.media().len(), 1);
    }
}
