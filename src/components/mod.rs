pub mod flow_graph;
