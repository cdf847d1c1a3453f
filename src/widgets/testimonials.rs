use crate::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
}

impl Testimonial {
    pub fn new(text: &str, author: &str) -> Self {
        Self {
            text: text.to_string(),
            author: author.to_string(),
        }
    }

    /// The three quotes shown on the live site.
    pub fn defaults() -> Vec<Testimonial> {
        vec![
            Self::new(
                "Service impeccable et équipe très humaine. Notre maison est toujours parfaite.",
                "Camille, Vernouillet – Entretien de la maison",
            ),
            Self::new(
                "Une aide précieuse pour la garde de nos enfants. Confiance totale.",
                "Rachid, Triel-sur-Seine – Garde d’enfants",
            ),
            Self::new(
                "Rapide et efficace pour le petit bricolage. Je recommande.",
                "Isabelle, Verneuil – Petit bricolage",
            ),
        ]
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TestimonialCarousel {
    entries: Vec<Testimonial>,
    index: usize,
    text: NodeId,
    author: NodeId,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl TestimonialCarousel {
    /// Needs both output nodes and at least one entry.
    pub(crate) fn bind(dom: &Dom, entries: Vec<Testimonial>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            entries,
            index: 0,
            text: dom.by_id("testimonialText")?,
            author: dom.by_id("testimonialAuthor")?,
            prev: dom.by_id("prevTestimonial"),
            next: dom.by_id("nextTestimonial"),
        })
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn render(&self, dom: &mut Dom) -> Result<()> {
        let entry = &self.entries[self.index];
        dom.set_text_content(self.text, &entry.text)?;
        dom.set_text_content(self.author, &entry.author)
    }

    pub(crate) fn next(&mut self, dom: &mut Dom) -> Result<usize> {
        self.index = (self.index + 1) % self.entries.len();
        self.render(dom)?;
        Ok(self.index)
    }

    pub(crate) fn prev(&mut self, dom: &mut Dom) -> Result<usize> {
        let len = self.entries.len();
        self.index = (self.index + len - 1) % len;
        self.render(dom)?;
        Ok(self.index)
    }
}
