pub(crate) mod crossing;
pub(crate) mod gpio_input;
pub(crate) mod light_driver;
pub(crate) mod remote_link;
