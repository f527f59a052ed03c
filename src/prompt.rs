//! System context sent with every model request.

use std::fmt::{self, Write};
use std::sync::Arc;

use crate::portfolio::{Portfolio, TimelineItem};

/// The fixed instruction preamble. Built once, then shared read-only.
///
/// Also remembers who the assistant speaks for, so greetings and the
/// support line name the owner of whichever portfolio was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemContext {
    text: Arc<str>,
    owner: Arc<str>,
    possessive: Arc<str>,
}

impl SystemContext {
    /// Render the instruction for `portfolio`.
    pub fn build(portfolio: &Portfolio) -> Self {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = render(&mut out, portfolio);
        Self {
            text: out.into(),
            owner: portfolio.first_name().into(),
            possessive: portfolio.possessive().into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Shared handle to the rendered text.
    pub fn shared(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// First name of the portfolio owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Possessive form used when referring to the owner ("his", "Ada's").
    pub fn possessive(&self) -> &str {
        &self.possessive
    }
}

impl fmt::Display for SystemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn render(out: &mut String, portfolio: &Portfolio) -> fmt::Result {
    let me = &portfolio.personal;
    let first = portfolio.first_name();

    writeln!(
        out,
        "You are \"{first} AI\", a highly persuasive and professional assistant for {}'s portfolio.",
        me.name
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Your goal is to impress visitors and convince them to hire {first} or enroll in their courses."
    )?;
    writeln!(out)?;
    writeln!(out, "CRITICAL FORMATTING RULES:")?;
    writeln!(out, "1. DO NOT use long paragraphs or essays.")?;
    writeln!(out, "2. ALWAYS use structured lists for your content. Use a mix of:")?;
    writeln!(out, "   - Bullet points (•)")?;
    writeln!(out, "   - Dashes (-)")?;
    writeln!(out, "   - Numbered lists (1., 2.)")?;
    writeln!(out, "3. Keep responses concise, scannable, and visually appealing.")?;
    writeln!(out)?;
    writeln!(out, "Context about {first}:")?;
    writeln!(out, "- Name: {}", me.name)?;
    writeln!(out, "- Core Role: {}", me.role)?;
    if !portfolio.other_roles.is_empty() {
        writeln!(out, "- Other Roles: {}", portfolio.other_roles.join(", "))?;
    }
    writeln!(out, "- Location: {}", me.address)?;
    writeln!(out, "- Contact: Phone {}, Email {}", me.phone, me.email)?;
    writeln!(out, "- Bio: {}", me.bio)?;
    writeln!(out)?;

    writeln!(out, "Services/Teaching:")?;
    for course in &portfolio.courses {
        writeln!(out, "• {}: {} ({})", course.title, course.description, course.level)?;
    }
    writeln!(out)?;

    writeln!(out, "Projects:")?;
    for project in &portfolio.projects {
        writeln!(
            out,
            "• {}: {} (Tech: {})",
            project.title,
            project.description,
            project.technologies.join(", ")
        )?;
    }
    writeln!(out)?;

    timeline_section(out, "Education", &portfolio.education)?;
    timeline_section(out, "Experience", &portfolio.experience)?;

    writeln!(out, "Tone: Professional, Enthusiastic, Persuasive, and Helpful.")?;
    write!(
        out,
        "If asked about unrelated topics, politely pivot back to {first}'s expertise using a bullet point."
    )
}

fn timeline_section(out: &mut String, heading: &str, items: &[TimelineItem]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "{heading}:")?;
    for item in items {
        writeln!(
            out,
            "• {} ({}, {}): {}",
            item.title, item.institution, item.period, item.description
        )?;
    }
    writeln!(out)
}
