//! Writing page controller
//!
//! Hosts the article draft, takes generated text from the form's events
//! and drives the article actions.

use crate::client::article::{ArticleClient, ExportedDocument};
use crate::client::error::ClientError;
use crate::client::form::FormEvent;
use crate::models::{Article, ExportFormat};
use tokio::sync::mpsc;
use tracing::debug;

/// Writing page controller
pub struct WritingPage {
    article: Article,
    articles: ArticleClient,
    events: mpsc::UnboundedReceiver<FormEvent>,
}

impl WritingPage {
    pub fn new(articles: ArticleClient, events: mpsc::UnboundedReceiver<FormEvent>) -> Self {
        Self {
            article: Article::default(),
            articles,
            events,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Copy a generated title and content into the draft article
    pub fn apply(&mut self, event: FormEvent) {
        match event {
            FormEvent::Generated { title, content } => {
                debug!("Article draft replaced by generated content: {}", title);
                self.article.title = title;
                self.article.content = content;
            }
        }
    }

    /// Apply every event already queued; returns how many were applied
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next event and apply it; `false` once the form is gone
    pub async fn next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.article.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.article.content = content.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.article.author = author.into();
    }

    pub async fn save(&self) -> Result<(), ClientError> {
        self.articles.save(&self.article).await
    }

    /// Audio rendition of the current content
    pub async fn speak(&self) -> Result<Vec<u8>, ClientError> {
        self.articles.speak(&self.article.content).await
    }

    pub async fn export(&self, format: ExportFormat) -> Result<ExportedDocument, ClientError> {
        self.articles.export(&self.article, format).await
    }
}
