//! # Widget Catalog
//!
//! The palette of widget types and the default data each one starts with.
//! Section widgets (hero, features, posts, ...) share their ids with the
//! template section keys so seeded pages and hand-built pages look alike.

use crate::{WidgetCategory, WidgetData, WidgetType};
use serde_json::{json, Value};

macro_rules! widget {
    ($id:literal, $name:literal, $icon:literal, $category:ident, $description:literal) => {
        WidgetType {
            id: $id,
            name: $name,
            icon: $icon,
            category: WidgetCategory::$category,
            description: $description,
        }
    };
}

pub static WIDGET_TYPES: &[WidgetType] = &[
    // Layout
    widget!("section", "Section", "square", Layout, "Full-width band that groups other content"),
    widget!("container", "Container", "box", Layout, "Centered, width-constrained wrapper"),
    widget!("columns", "Columns", "columns", Layout, "Side-by-side column layout"),
    widget!("spacer", "Spacer", "move-vertical", Layout, "Vertical whitespace"),
    widget!("divider", "Divider", "minus", Layout, "Horizontal rule between blocks"),
    // Content
    widget!("hero", "Hero", "layout", Content, "Large headline banner with call to action"),
    widget!("heading", "Heading", "heading", Content, "Section title"),
    widget!("text", "Text", "type", Content, "Paragraph of rich text"),
    widget!("about", "About", "info", Content, "Story or mission statement"),
    widget!("features", "Features", "star", Content, "Grid of feature highlights"),
    widget!("testimonials", "Testimonials", "message-square", Content, "Customer quotes"),
    widget!("pricing", "Pricing", "tag", Content, "Pricing plans table"),
    widget!("posts", "Blog Posts", "file-text", Content, "List of recent articles"),
    widget!("faq", "FAQ", "help-circle", Content, "Frequently asked questions"),
    // Media
    widget!("image", "Image", "image", Media, "Single picture with caption"),
    widget!("gallery", "Gallery", "grid", Media, "Grid of images"),
    widget!("video", "Video", "video", Media, "Embedded video player"),
    // Interactive
    widget!("button", "Button", "mouse-pointer", Interactive, "Clickable call to action"),
    widget!("accordion", "Accordion", "chevrons-down", Interactive, "Collapsible panels"),
    widget!("tabs", "Tabs", "folder", Interactive, "Tabbed content panels"),
    widget!("countdown", "Countdown", "clock", Interactive, "Timer counting down to a date"),
    // Forms
    widget!("contact-form", "Contact Form", "mail", Forms, "Name, email and message form"),
    widget!("newsletter", "Newsletter", "send", Forms, "Email signup form"),
    // Business
    widget!("menu", "Menu", "coffee", Business, "Restaurant menu with prices"),
    widget!("products", "Products", "shopping-bag", Business, "Product cards with prices"),
    widget!("services", "Services", "briefcase", Business, "List of offered services"),
    widget!("portfolio", "Portfolio", "aperture", Business, "Showcase of past work"),
    widget!("team", "Team", "users", Business, "Team member cards"),
    widget!("booking", "Booking", "calendar", Business, "Appointment booking widget"),
    // Social
    widget!("social-links", "Social Links", "share-2", Social, "Icons linking to social profiles"),
    widget!("share-buttons", "Share Buttons", "share", Social, "Share this page buttons"),
    widget!("instagram-feed", "Instagram Feed", "instagram", Social, "Latest Instagram posts"),
];

pub fn find_widget_type(id: &str) -> Option<&'static WidgetType> {
    WIDGET_TYPES.iter().find(|widget_type| widget_type.id == id)
}

pub fn is_known_widget_type(id: &str) -> bool {
    find_widget_type(id).is_some()
}

pub fn widget_types_in(category: WidgetCategory) -> impl Iterator<Item = &'static WidgetType> {
    WIDGET_TYPES
        .iter()
        .filter(move |widget_type| widget_type.category == category)
}

/// Default data for a widget type, or `None` if the type is not in the catalog
pub fn default_data(id: &str) -> Option<WidgetData> {
    let value = match id {
        "section" => json!({ "background": "#ffffff", "padding": "64px 24px" }),
        "container" => json!({ "maxWidth": "1200px", "padding": "0 24px" }),
        "columns" => json!({ "count": 2, "gap": "24px", "columns": [] }),
        "spacer" => json!({ "height": "48px" }),
        "divider" => json!({ "color": "#e5e7eb", "thickness": "1px" }),
        "hero" => json!({
            "title": "Welcome to Our Website",
            "subtitle": "Build something amazing with our platform",
            "buttonText": "Get Started",
            "buttonLink": "#",
            "backgroundImage": "",
            "alignment": "center"
        }),
        "heading" => json!({ "text": "Your Heading Here", "level": 2, "alignment": "left" }),
        "text" => json!({ "content": "Add your text here. Click to edit.", "alignment": "left" }),
        "about" => json!({
            "title": "About Us",
            "content": "Tell your visitors who you are and what you stand for."
        }),
        "features" => json!({
            "title": "Our Features",
            "items": [
                { "title": "Fast", "description": "Pages load in the blink of an eye", "icon": "zap" },
                { "title": "Secure", "description": "Your data stays protected", "icon": "shield" },
                { "title": "Reliable", "description": "Always online when you need it", "icon": "check" }
            ]
        }),
        "testimonials" => json!({
            "title": "What Our Customers Say",
            "items": [
                { "name": "Jane Doe", "role": "Customer", "quote": "Absolutely fantastic service." }
            ]
        }),
        "pricing" => json!({
            "title": "Pricing",
            "plans": [
                { "name": "Basic", "price": "$9", "period": "month", "features": ["1 website"] },
                { "name": "Pro", "price": "$29", "period": "month", "features": ["10 websites"] }
            ]
        }),
        "posts" => json!({
            "title": "Latest Posts",
            "items": [
                { "title": "First Post", "excerpt": "A short summary of the article.", "date": "2024-01-01" }
            ]
        }),
        "faq" => json!({
            "title": "Frequently Asked Questions",
            "items": [ { "question": "How does it work?", "answer": "Simply pick a template and start editing." } ]
        }),
        "image" => json!({
            "src": "https://via.placeholder.com/800x400",
            "alt": "Image description",
            "caption": ""
        }),
        "gallery" => json!({ "images": [], "columns": 3 }),
        "video" => json!({ "url": "", "autoplay": false, "controls": true }),
        "button" => json!({ "text": "Click Me", "link": "#", "style": "primary", "size": "medium" }),
        "accordion" => json!({ "items": [ { "title": "Panel 1", "content": "Panel content" } ] }),
        "tabs" => json!({ "items": [ { "label": "Tab 1", "content": "Tab content" } ] }),
        "countdown" => json!({ "title": "Launching Soon", "targetDate": "" }),
        "contact-form" => json!({
            "title": "Contact Us",
            "fields": ["name", "email", "message"],
            "submitText": "Send Message"
        }),
        "newsletter" => json!({
            "title": "Subscribe to our newsletter",
            "placeholder": "Enter your email",
            "buttonText": "Subscribe"
        }),
        "menu" => json!({
            "title": "Our Menu",
            "items": [ { "name": "House Special", "description": "Chef's choice", "price": "$18" } ]
        }),
        "products" => json!({
            "title": "Featured Products",
            "items": [ { "name": "Product", "price": "$49", "image": "" } ]
        }),
        "services" => json!({
            "title": "Our Services",
            "items": [ { "title": "Consulting", "description": "Expert advice for your business" } ]
        }),
        "portfolio" => json!({
            "title": "Our Work",
            "items": [ { "title": "Project One", "category": "Design", "image": "" } ]
        }),
        "team" => json!({
            "title": "Meet the Team",
            "members": [ { "name": "Alex Smith", "role": "Founder", "image": "" } ]
        }),
        "booking" => json!({ "title": "Book an Appointment", "buttonText": "Book Now" }),
        "social-links" => json!({
            "links": [
                { "platform": "twitter", "url": "#" },
                { "platform": "instagram", "url": "#" }
            ]
        }),
        "share-buttons" => json!({ "platforms": ["twitter", "facebook", "linkedin"] }),
        "instagram-feed" => json!({ "username": "", "count": 6 }),
        _ => return None,
    };

    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
