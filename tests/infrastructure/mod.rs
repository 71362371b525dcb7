mod llm;
mod persistence;
