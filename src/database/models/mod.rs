pub mod blog_post;
pub mod message;
pub mod property;
pub mod row;
pub mod testimonial;
pub mod user;

pub use blog_post::BlogPost;
pub use message::Message;
pub use property::Property;
pub use testimonial::Testimonial;
pub use user::User;
