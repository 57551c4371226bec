//! Media attachments of a post.
//!
//! A post carries a primary reference plus an ordered list of extra
//! references, capped at [`MAX_MEDIA`] in total. The media type follows the
//! attachments: a lone video is `video`, a lone image is `image`, anything
//! with extra references is `carousel`.

use serde::{Deserialize, Serialize};

use crate::models::post::{Post, UpdatePost};
use crate::status::MediaType;

/// Maximum number of media references on one post.
pub const MAX_MEDIA: usize = 20;

/// An uploaded file, ready to attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
    pub is_video: bool,
}

impl UploadedMedia {
    pub fn new(url: impl Into<String>, content_type: &str) -> Self {
        Self {
            url: url.into(),
            is_video: is_video_content_type(content_type),
        }
    }
}

pub fn is_video_content_type(content_type: &str) -> bool {
    content_type.trim().to_ascii_lowercase().starts_with("video/")
}

/// Which attachment to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Primary,
    /// Index into the extra references.
    Extra(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSet {
    pub primary: Option<String>,
    pub extra: Vec<String>,
    pub media_type: MediaType,
}

impl MediaSet {
    pub fn of(post: &Post) -> Self {
        Self {
            primary: post.media_url.clone().filter(|u| !u.is_empty()),
            extra: post.media_urls.clone(),
            media_type: post.media_type,
        }
    }

    pub fn len(&self) -> usize {
        self.extra.len() + usize::from(self.primary.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining_slots(&self) -> usize {
        MAX_MEDIA.saturating_sub(self.len())
    }

    /// Attach one upload batch, dropping whatever exceeds the cap.
    ///
    /// On an empty set the first file becomes the primary reference; the
    /// rest append. Returns the number of files attached.
    pub fn attach(&mut self, batch: Vec<UploadedMedia>) -> usize {
        let accepted: Vec<UploadedMedia> = batch.into_iter().take(self.remaining_slots()).collect();
        let batch_len = accepted.len();
        for upload in accepted {
            if self.is_empty() {
                self.media_type = if upload.is_video {
                    MediaType::Video
                } else if batch_len > 1 {
                    MediaType::Carousel
                } else {
                    MediaType::Image
                };
                self.primary = Some(upload.url);
            } else {
                self.extra.push(upload.url);
                self.media_type = MediaType::Carousel;
            }
        }
        batch_len
    }

    /// Remove one attachment. Removing the primary promotes the first extra
    /// reference. Out-of-range slots are ignored.
    pub fn remove(&mut self, slot: MediaSlot) {
        match slot {
            MediaSlot::Primary => {
                self.primary = if self.extra.is_empty() {
                    None
                } else {
                    Some(self.extra.remove(0))
                };
                self.media_type = if self.extra.is_empty() {
                    MediaType::Image
                } else {
                    MediaType::Carousel
                };
            }
            MediaSlot::Extra(index) => {
                if index >= self.extra.len() {
                    return;
                }
                self.extra.remove(index);
                self.media_type = if self.extra.is_empty() && self.primary.is_some() {
                    MediaType::Image
                } else {
                    MediaType::Carousel
                };
            }
        }
    }

    /// Partial update writing the media fields back.
    pub fn into_update(self) -> UpdatePost {
        UpdatePost {
            media_url: Some(self.primary.unwrap_or_default()),
            media_urls: Some(self.extra),
            media_type: Some(self.media_type),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str) -> UploadedMedia {
        UploadedMedia::new(url, "image/jpeg")
    }

    #[test]
    fn single_image_becomes_primary() {
        let mut set = MediaSet::default();
        assert_eq!(set.attach(vec![image("a")]), 1);
        assert_eq!(set.primary.as_deref(), Some("a"));
        assert_eq!(set.media_type, MediaType::Image);
    }

    #[test]
    fn single_video_sets_video_type() {
        let mut set = MediaSet::default();
        set.attach(vec![UploadedMedia::new("v", "video/mp4")]);
        assert_eq!(set.media_type, MediaType::Video);
    }

    #[test]
    fn batch_and_later_uploads_make_a_carousel() {
        let mut set = MediaSet::default();
        set.attach(vec![image("a"), image("b")]);
        assert_eq!(set.primary.as_deref(), Some("a"));
        assert_eq!(set.extra, vec!["b"]);
        assert_eq!(set.media_type, MediaType::Carousel);

        let mut single = MediaSet::default();
        single.attach(vec![image("a")]);
        single.attach(vec![image("c")]);
        assert_eq!(single.media_type, MediaType::Carousel);
        assert_eq!(single.len(), 2);
    }

    #[test]
    fn uploads_beyond_cap_are_dropped() {
        let mut set = MediaSet::default();
        let batch: Vec<_> = (0..25).map(|i| image(&format!("m{i}"))).collect();
        assert_eq!(set.attach(batch), MAX_MEDIA);
        assert_eq!(set.len(), MAX_MEDIA);
        assert_eq!(set.attach(vec![image("x")]), 0);
    }

    #[test]
    fn removing_primary_promotes_first_extra() {
        let mut set = MediaSet::default();
        set.attach(vec![image("a"), image("b"), image("c")]);
        set.remove(MediaSlot::Primary);
        assert_eq!(set.primary.as_deref(), Some("b"));
        assert_eq!(set.extra, vec!["c"]);
        assert_eq!(set.media_type, MediaType::Carousel);

        set.remove(MediaSlot::Extra(0));
        assert_eq!(set.media_type, MediaType::Image);
        set.remove(MediaSlot::Primary);
        assert!(set.is_empty());
    }

    #[test]
    fn out_of_range_removal_is_ignored() {
        let mut set = MediaSet::default();
        set.attach(vec![image("a")]);
        set.remove(MediaSlot::Extra(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn update_writes_all_media_fields() {
        let mut set = MediaSet::default();
        set.attach(vec![image("a")]);
        let json = serde_json::to_value(set.into_update()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"media_url": "a", "media_urls": [], "media_type": "image"})
        );
    }
}
