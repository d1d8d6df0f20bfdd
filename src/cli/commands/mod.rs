pub mod crm;
pub mod oauth;
pub mod site;
