// TUI application state and event handling
use folio_core::contact::{ContactForm, Field, FieldError};
use folio_core::{
    ActivitySummary, CategoryFilter, GalleryState, Profile, ProfileLinks, Project,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Services,
    Projects,
    Activity,
    Skills,
    Education,
    Resume,
    Contact,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::About,
        Section::Services,
        Section::Projects,
        Section::Activity,
        Section::Skills,
        Section::Education,
        Section::Resume,
        Section::Contact,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Services => "Services",
            Section::Projects => "Projects",
            Section::Activity => "Activity",
            Section::Skills => "Skills",
            Section::Education => "Education",
            Section::Resume => "Resume",
            Section::Contact => "Contact",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,    // Navigating sections and cards
    Searching, // Typing in the gallery search box
    Contact,   // Filling in the contact form
}

/// Which link of the selected card to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Code,
    Demo,
}

pub struct App {
    pub should_quit: bool,
    pub section: Section,
    pub input_mode: InputMode,
    pub profile: Profile,
    pub gallery: GalleryState,
    pub search_input: String,
    /// Card index within the current page
    pub selected: usize,
    pub show_detail: bool,
    pub loading: bool,
    pub scroll: u16,
    pub activity: ActivitySummary,
    pub links: ProfileLinks,
    pub contact: ContactForm,
    pub contact_field: usize,
    pub contact_errors: Vec<FieldError>,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Start with the manual entries; GitHub projects arrive later
    pub fn new(profile: Profile, username: &str) -> folio_core::Result<Self> {
        let gallery = GalleryState::new(profile.manual_projects()?);
        let activity = ActivitySummary::from_projects(gallery.items());

        Ok(Self {
            should_quit: false,
            section: Section::About,
            input_mode: InputMode::Normal,
            profile,
            gallery,
            search_input: String::new(),
            selected: 0,
            show_detail: false,
            loading: false,
            scroll: 0,
            activity,
            links: ProfileLinks::for_user(username),
            contact: ContactForm::default(),
            contact_field: 0,
            contact_errors: Vec::new(),
            status_message: None,
            error_message: None,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn apply_fetch_result(&mut self, projects: Vec<Project>) {
        self.gallery.apply_fetch_result(projects);
        self.activity = ActivitySummary::from_projects(self.gallery.items());
        self.loading = false;
        self.clamp_selection();
    }

    pub fn select_section(&mut self, section: Section) {
        self.section = section;
        self.input_mode = InputMode::Normal;
        self.show_detail = false;
        self.scroll = 0;
    }

    pub fn next_section(&mut self) {
        let next = (self.section.index() + 1) % Section::ALL.len();
        self.select_section(Section::ALL[next]);
    }

    pub fn previous_section(&mut self) {
        let len = Section::ALL.len();
        let prev = (self.section.index() + len - 1) % len;
        self.select_section(Section::ALL[prev]);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    // Gallery

    pub fn next_category(&mut self) {
        self.step_category(1);
    }

    pub fn previous_category(&mut self) {
        self.step_category(-1);
    }

    fn step_category(&mut self, step: isize) {
        let tabs = self.gallery.categories();
        let current = tabs
            .iter()
            .position(|c| *c == self.gallery.filter())
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.set_filter(tabs[next]);
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.gallery.set_filter(filter);
        self.selected = 0;
    }

    pub fn next_card(&mut self) {
        let count = self.gallery.page_items().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn previous_card(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.gallery.next_page();
        self.selected = 0;
    }

    pub fn previous_page(&mut self) {
        self.gallery.prev_page();
        self.selected = 0;
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.gallery.page_items().get(self.selected).copied()
    }

    pub fn open_detail(&mut self) {
        self.show_detail = self.selected_project().is_some();
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
    }

    /// URL behind the selected card's code or demo button, if it has one
    pub fn link_for(&self, kind: LinkKind) -> Option<String> {
        let project = self.selected_project()?;
        match kind {
            LinkKind::Code => project.github_url.clone(),
            LinkKind::Demo => project.demo_url.clone(),
        }
    }

    pub fn enter_search_mode(&mut self) {
        self.search_input = self.gallery.search().to_string();
        self.input_mode = InputMode::Searching;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// The gallery filters as the user types
    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.sync_search();
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.sync_search();
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.sync_search();
    }

    fn sync_search(&mut self) {
        self.gallery.set_search(self.search_input.clone());
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.gallery.page_items().len();
        self.selected = self.selected.min(count.saturating_sub(1));
        if count == 0 {
            self.show_detail = false;
        }
    }

    // Contact form

    pub fn enter_contact_mode(&mut self) {
        self.input_mode = InputMode::Contact;
        self.status_message = None;
    }

    pub fn current_field(&self) -> Field {
        Field::ALL[self.contact_field]
    }

    pub fn next_field(&mut self) {
        self.contact_field = (self.contact_field + 1) % Field::ALL.len();
    }

    pub fn previous_field(&mut self) {
        let len = Field::ALL.len();
        self.contact_field = (self.contact_field + len - 1) % len;
    }

    pub fn contact_input(&mut self, c: char) {
        match self.current_field() {
            // picked from a fixed list, not typed
            Field::ServiceType => {
                if c == ' ' {
                    self.contact.cycle_service_type();
                }
            }
            field => self.contact.field_mut(field).push(c),
        }
    }

    pub fn contact_backspace(&mut self) {
        let field = self.current_field();
        if field == Field::ServiceType {
            self.contact.service_type.clear();
        } else {
            self.contact.field_mut(field).pop();
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.contact_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// Validate and, when it passes, acknowledge and clear the form
    pub fn submit_contact(&mut self) {
        match self.contact.validate() {
            Ok(message) => {
                self.status_message = Some(format!(
                    "Thanks, {}! I'll get back to you at {} soon.",
                    message.name, message.email
                ));
                self.contact.reset();
                self.contact_errors.clear();
                self.contact_field = 0;
                self.input_mode = InputMode::Normal;
            }
            Err(errors) => {
                if let Some(first) = errors.first() {
                    self.contact_field = Field::ALL
                        .iter()
                        .position(|f| *f == first.field)
                        .unwrap_or(0);
                }
                self.contact_errors = errors;
                self.status_message = None;
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
