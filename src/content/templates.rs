//! Card markup for each content kind.
//!
//! Field values go into the markup as-is unless escaping is requested: the
//! data files ship with the site and are trusted like the rest of its HTML.

use super::models::{Event, NewsItem, Program, Resource};

/// An item that renders to one card fragment.
pub trait CardTemplate {
    fn render_card(&self, escape: bool) -> String;
}

impl CardTemplate for NewsItem {
    fn render_card(&self, escape: bool) -> String {
        let link = self.link.text(escape);
        let title = self.title.text(escape);
        format!(
            r#"
      <article class="card">
        <div class="card-image">
          <img src="{image}" alt="{title}" loading="lazy">
        </div>
        <div class="card-content">
          <span class="card-tag">{category}</span>
          <span class="card-date">{date}</span>
          <h3 class="card-title"><a href="{link}">{title}</a></h3>
          <p class="card-excerpt">{excerpt}</p>
          <div class="card-footer">
            <a href="{link}" class="card-link">Read More</a>
          </div>
        </div>
      </article>
    "#,
            image = self.image.text(escape),
            title = title,
            category = self.category.text(escape),
            date = self.date.display_date(),
            link = link,
            excerpt = self.excerpt.text(escape),
        )
    }
}

impl CardTemplate for Program {
    fn render_card(&self, escape: bool) -> String {
        let title = self.title.text(escape);
        format!(
            r##"
      <div class="card">
        <div class="card-image">
          <img src="{image}" alt="{title}" loading="lazy">
        </div>
        <div class="card-content">
          <h3 class="card-title">{title}</h3>
          <p class="card-excerpt">{description}</p>
          <div class="card-footer">
            <a href="#" class="btn btn-secondary">Learn More</a>
          </div>
        </div>
      </div>
    "##,
            image = self.image.text(escape),
            title = title,
            description = self.description.text(escape),
        )
    }
}

impl CardTemplate for Event {
    fn render_card(&self, escape: bool) -> String {
        let title = self.title.text(escape);
        format!(
            r#"
      <div class="card">
        <div class="card-image">
          <img src="{image}" alt="{title}" loading="lazy">
        </div>
        <div class="card-content">
          <div class="card-date">{date} • {time}</div>
          <h3 class="card-title">{title}</h3>
          <p class="card-excerpt">{description}</p>
          <p style="font-size: 0.9rem; color: var(--text-muted); margin: 0.5rem 0;">📍 {location}</p>
          <div class="card-footer">
            <a href="{registration}" class="btn btn-primary">Register Now</a>
          </div>
        </div>
      </div>
    "#,
            image = self.image.text(escape),
            title = title,
            date = self.date.display_date(),
            time = self.time.text(escape),
            description = self.description.text(escape),
            location = self.location.text(escape),
            registration = self.registration_link().text(escape),
        )
    }
}

impl CardTemplate for Resource {
    fn render_card(&self, escape: bool) -> String {
        format!(
            r#"
      <div class="card">
        <div class="card-content">
          <div style="display: flex; justify-content: space-between; align-items: start; margin-bottom: 1rem;">
            <span class="card-tag">{category}</span>
            <span style="font-size: 0.8rem; background: var(--background-alt); padding: 0.2rem 0.5rem; border-radius: var(--radius-sm);">{kind}</span>
          </div>
          <h3 class="card-title">{title}</h3>
          <p class="card-excerpt">{description}</p>
          <div class="card-footer">
            <a href="{download}" class="btn btn-secondary">Download</a>
          </div>
        </div>
      </div>
    "#,
            category = self.category.text(escape),
            kind = self.kind.text(escape),
            title = self.title.text(escape),
            description = self.description.text(escape),
            download = self.download_url.text(escape),
        )
    }
}
