pub mod raster_renderer;
